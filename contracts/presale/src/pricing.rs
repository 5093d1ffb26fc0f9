//! Fee split, decimal normalization and phase pricing.
//!
//! Everything here is pure integer arithmetic over token base units. Each
//! helper returns `None` on overflow so the caller can reject the whole
//! purchase; no helper panics.

use crate::types::{Phase, LAST_PHASE};

/// Denominator of a basis-point rate (`200` bps = 2 %).
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Precision every amount is normalized to before pricing.
pub const WAD_DECIMALS: u32 = 18;

/// Fixed-point scale of `Phase::price`.
pub const PRICE_SCALE: i128 = 1_000_000;

/// `10^exp`, or `None` past the `i128` range.
pub fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}

/// Split `gross` into `(fee, net)`.
///
/// The fee truncates toward zero, so `fee + net == gross` and rounding
/// always favours the buyer.
pub fn split_fee(gross: i128, fee_bps: u32) -> Option<(i128, i128)> {
    let fee = gross.checked_mul(fee_bps as i128)? / BPS_DENOMINATOR;
    Some((fee, gross.checked_sub(fee)?))
}

/// Rescale `amount` from `decimals` fractional digits to 18.
pub fn to_wad(amount: i128, decimals: u32) -> Option<i128> {
    if decimals <= WAD_DECIMALS {
        amount.checked_mul(pow10(WAD_DECIMALS - decimals)?)
    } else {
        amount.checked_div(pow10(decimals - WAD_DECIMALS)?)
    }
}

/// Reference-currency value (18 decimals) of a native amount already in WAD.
///
/// `answer` carries `feed_decimals` fractional digits. Dividing by
/// `10^feed_decimals` is the same as lifting the answer to 18 decimals and
/// dividing the product by `1e18`.
pub fn native_value(net_wad: i128, answer: i128, feed_decimals: u32) -> Option<i128> {
    net_wad.checked_mul(answer)?.checked_div(pow10(feed_decimals)?)
}

/// Sale-token base units bought with `value_wad` at `price`.
///
/// For an 18-decimal sale token this is `value_wad * 1e6 / price`.
pub fn tokens_for_value(value_wad: i128, price: i128, sale_decimals: u32) -> Option<i128> {
    let scaled = value_wad.checked_mul(PRICE_SCALE)?;
    if sale_decimals <= WAD_DECIMALS {
        let denominator = price.checked_mul(pow10(WAD_DECIMALS - sale_decimals)?)?;
        scaled.checked_div(denominator)
    } else {
        scaled
            .checked_mul(pow10(sale_decimals - WAD_DECIMALS)?)?
            .checked_div(price)
    }
}

/// Phase index after a purchase of `candidate` units.
///
/// Moves forward by one when the purchase reaches the active phase's supply
/// cap, or when the phase deadline has passed. Both branches are clamped to
/// the final phase.
pub fn advance_phase(current: u32, total_sold: i128, candidate: i128, phase: &Phase, now: u64) -> u32 {
    let reaches_cap = total_sold.saturating_add(candidate) >= phase.supply_cap;
    let expired = now >= phase.deadline && current < LAST_PHASE;

    if reaches_cap || expired {
        current.saturating_add(1).min(LAST_PHASE)
    } else {
        current
    }
}
