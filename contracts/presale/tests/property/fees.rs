#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the purchase fee.
//!
//! Invariants tested:
//! - `fee + net == gross` for every gross amount and every rate
//! - The fee never exceeds `gross * fee_bps / 10_000`, and rounds toward zero
//! - A purchase moves exactly `net` to the receiver and `fee` into custody
//! - Per-asset fee counters equal the sum of the fees of their purchases

use presale::pricing::{split_fee, BPS_DENOMINATOR};
use presale::Asset;
use proptest::prelude::*;

use crate::harness::{setup, ONE};

proptest! {
    /// The split is exact and truncating for any non-negative gross.
    #[test]
    fn prop_split_is_exact(
        gross in 0i128..=(i128::MAX / BPS_DENOMINATOR / 2),
        fee_bps in 0u32..=10_000u32,
    ) {
        let (fee, net) = split_fee(gross, fee_bps).unwrap();

        prop_assert_eq!(fee + net, gross);
        prop_assert!(fee >= 0 && fee <= gross);
        prop_assert!(fee * BPS_DENOMINATOR <= gross * fee_bps as i128);
        prop_assert!((fee + 1) * BPS_DENOMINATOR > gross * fee_bps as i128);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A single purchase routes `net` and `fee` to the right places.
    #[test]
    fn prop_purchase_routes_net_and_fee(
        fee_bps in 0u32..=10_000u32,
        whole in 1i128..=20_000i128,
        dust in 0i128..ONE,
    ) {
        let sale = setup(fee_bps);
        let gross = whole * ONE + dust;
        let buyer = sale.funded_buyer(&sale.usdc, gross);

        let quote = sale.client.purchase_with_payment_asset(&buyer, &sale.usdc, &gross);

        prop_assert_eq!(quote.fee + quote.net, gross);
        prop_assert_eq!(sale.balance(&sale.usdc, &buyer), 0);
        prop_assert_eq!(sale.balance(&sale.usdc, &sale.receiver), quote.net);
        prop_assert_eq!(sale.balance(&sale.usdc, &sale.client.address), quote.fee);
        prop_assert_eq!(
            sale.client.accrued_fee(&Asset::Token(sale.usdc.clone())),
            quote.fee
        );
    }

    /// Fee counters are kept per asset and only ever accumulate.
    #[test]
    fn prop_fee_counters_accumulate_per_asset(
        amounts in proptest::collection::vec((1i128..=2_000i128, 0u8..3u8), 1..8),
    ) {
        let sale = setup(250);
        let mut usdc_fees = 0i128;
        let mut usdt_fees = 0i128;
        let mut native_fees = 0i128;

        for (whole, which) in amounts {
            let gross = whole * ONE;
            match which {
                0 => {
                    let buyer = sale.funded_buyer(&sale.usdc, gross);
                    usdc_fees += sale.client.purchase_with_payment_asset(&buyer, &sale.usdc, &gross).fee;
                }
                1 => {
                    let buyer = sale.funded_buyer(&sale.usdt, gross);
                    usdt_fees += sale.client.purchase_with_payment_asset(&buyer, &sale.usdt, &gross).fee;
                }
                _ => {
                    let buyer = sale.funded_buyer(&sale.native, gross);
                    native_fees += sale.client.purchase_with_native(&buyer, &gross).fee;
                }
            }
        }

        prop_assert_eq!(sale.client.accrued_fee(&Asset::Token(sale.usdc.clone())), usdc_fees);
        prop_assert_eq!(sale.client.accrued_fee(&Asset::Token(sale.usdt.clone())), usdt_fees);
        prop_assert_eq!(sale.client.accrued_fee(&Asset::Native), native_fees);
        prop_assert_eq!(sale.balance(&sale.native, &sale.client.address), native_fees);
    }
}
