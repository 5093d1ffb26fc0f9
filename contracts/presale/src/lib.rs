//! # Phased Presale Contract
//!
//! Sells a token in three price tiers against two stable payment tokens and
//! the native coin, charges a basis-point fee on every purchase, and lets
//! buyers claim their allocation once the sale window has closed.
//!
//! | Stage        | Entry Point(s)                                              |
//! |--------------|-------------------------------------------------------------|
//! | Bootstrap    | [`PresaleContract::initialize`]                             |
//! | Sale window  | `purchase_with_payment_asset`, `purchase_with_native`       |
//! | After close  | `claim`, `withdraw_fees`                                    |
//! | Owner        | `set_blacklisted`, `deposit_sale_tokens`, emergency exits   |
//! | Ownership    | `propose_owner`, `accept_owner`, `cancel_owner_transfer`    |
//!
//! Every entry point that moves value out commits its bookkeeping first and
//! performs the token transfer last. Any `Err` rolls the whole call back.

#![no_std]

pub mod events;
pub mod oracle;
pub mod pricing;
mod storage;
pub mod types;

use common::{ownable, CommonError};
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Vec};

use oracle::PriceFeedClient;

pub use oracle::RoundData;
pub use types::{Asset, Phase, PresaleConfig, Quote, LAST_PHASE, PHASE_COUNT};

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    ZeroAmount = 4,
    UserBlacklisted = 5,
    PresaleInactive = 6,
    UnsupportedAsset = 7,
    MaxSupplyExceeded = 8,
    ClaimPeriodNotStarted = 9,
    NothingToClaim = 10,
    TransferFailed = 11,
    InvalidConfig = 12,
    ArithmeticOverflow = 13,
    InvalidOraclePrice = 14,
    NoPendingOwner = 15,
    PhaseNotFound = 16,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AccessDenied => ContractError::Unauthorized,
            CommonError::NoPendingTransfer => ContractError::NoPendingOwner,
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<PresaleConfig, ContractError> {
    let config = storage::get_config(env).ok_or(ContractError::NotInitialized)?;
    storage::bump_instance(env);
    Ok(config)
}

fn phase_at(env: &Env, index: u32) -> Result<Phase, ContractError> {
    storage::get_phases(env)
        .ok_or(ContractError::NotInitialized)?
        .get(index)
        .ok_or(ContractError::PhaseNotFound)
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    ownable::require_owner(env, caller)?;
    Ok(())
}

fn validate(config: &PresaleConfig, phases: &Vec<Phase>) -> Result<(), ContractError> {
    if config.ending_time <= config.starting_time
        || config.max_supply <= 0
        || (config.fee_bps as i128) > pricing::BPS_DENOMINATOR
    {
        return Err(ContractError::InvalidConfig);
    }

    let assets = &config.payment_assets;
    if assets.len() != 2 {
        return Err(ContractError::InvalidConfig);
    }
    if let (Some(first), Some(second)) = (assets.get(0), assets.get(1)) {
        if first == second {
            return Err(ContractError::InvalidConfig);
        }
    }

    if phases.len() != PHASE_COUNT {
        return Err(ContractError::InvalidConfig);
    }
    let mut previous_cap = 0i128;
    for phase in phases.iter() {
        if phase.price <= 0 || phase.supply_cap <= 0 || phase.supply_cap < previous_cap {
            return Err(ContractError::InvalidConfig);
        }
        previous_cap = phase.supply_cap;
    }
    Ok(())
}

/// Sale-window, blacklist and amount checks shared by both purchase kinds.
fn require_can_buy(
    env: &Env,
    config: &PresaleConfig,
    buyer: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if storage::is_blacklisted(env, buyer) {
        return Err(ContractError::UserBlacklisted);
    }
    if amount <= 0 {
        return Err(ContractError::ZeroAmount);
    }
    let now = env.ledger().timestamp();
    if now < config.starting_time || now > config.ending_time {
        return Err(ContractError::PresaleInactive);
    }
    Ok(())
}

fn require_payment_asset(config: &PresaleConfig, asset: &Address) -> Result<(), ContractError> {
    if config.payment_assets.iter().any(|a| a == *asset) {
        Ok(())
    } else {
        Err(ContractError::UnsupportedAsset)
    }
}

/// Price `value_wad` (reference currency, 18 decimals) at the active phase.
fn quote_value(env: &Env, fee: i128, net: i128, value_wad: i128) -> Result<Quote, ContractError> {
    let index = storage::current_phase(env);
    let phase = phase_at(env, index)?;
    let sale_decimals = storage::sale_decimals(env).ok_or(ContractError::NotInitialized)?;
    let tokens = pricing::tokens_for_value(value_wad, phase.price, sale_decimals)
        .ok_or(ContractError::ArithmeticOverflow)?;

    Ok(Quote {
        fee,
        net,
        tokens,
        phase: index,
    })
}

fn price_payment_asset(
    env: &Env,
    config: &PresaleConfig,
    asset: &Address,
    gross: i128,
) -> Result<Quote, ContractError> {
    let (fee, net) =
        pricing::split_fee(gross, config.fee_bps).ok_or(ContractError::ArithmeticOverflow)?;
    let decimals = token::Client::new(env, asset).decimals();
    let value = pricing::to_wad(net, decimals).ok_or(ContractError::ArithmeticOverflow)?;
    quote_value(env, fee, net, value)
}

fn price_native(env: &Env, config: &PresaleConfig, gross: i128) -> Result<Quote, ContractError> {
    let (fee, net) =
        pricing::split_fee(gross, config.fee_bps).ok_or(ContractError::ArithmeticOverflow)?;
    let decimals = token::Client::new(env, &config.native_asset).decimals();
    let net_wad = pricing::to_wad(net, decimals).ok_or(ContractError::ArithmeticOverflow)?;

    // No staleness check: the latest answer is taken as-is.
    let round = PriceFeedClient::new(env, &config.price_feed).latest_round_data();
    if round.answer < 0 {
        return Err(ContractError::InvalidOraclePrice);
    }
    let feed_decimals = storage::feed_decimals(env).ok_or(ContractError::NotInitialized)?;
    let value = pricing::native_value(net_wad, round.answer, feed_decimals)
        .ok_or(ContractError::ArithmeticOverflow)?;
    quote_value(env, fee, net, value)
}

/// Move `amount` of `asset`, mapping any token failure to `TransferFailed`.
fn transfer(
    env: &Env,
    asset: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    match token::Client::new(env, asset).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Book a priced purchase and collect payment.
///
/// The phase check runs against the phase the quote was priced at, so a
/// single purchase is never split across two prices.
fn settle_purchase(
    env: &Env,
    config: &PresaleConfig,
    buyer: &Address,
    pay_token: &Address,
    fee_asset: &Asset,
    quote: &Quote,
) -> Result<(), ContractError> {
    let now = env.ledger().timestamp();
    let sold = storage::total_sold(env);
    let phase = phase_at(env, quote.phase)?;
    let next_phase = pricing::advance_phase(quote.phase, sold, quote.tokens, &phase, now);

    let new_total = sold
        .checked_add(quote.tokens)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if new_total > config.max_supply {
        return Err(ContractError::MaxSupplyExceeded);
    }
    let owed = storage::deposited(env, buyer)
        .checked_add(quote.tokens)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let fees = storage::accrued_fee(env, fee_asset)
        .checked_add(quote.fee)
        .ok_or(ContractError::ArithmeticOverflow)?;

    // 1. Bookkeeping.
    storage::set_total_sold(env, new_total);
    if next_phase != quote.phase {
        storage::set_current_phase(env, next_phase);
        log!(env, "phase advanced", quote.phase, next_phase, new_total);
        events::publish_phase_advanced(env, quote.phase, next_phase, new_total);
    }
    storage::set_deposited(env, buyer, owed);
    storage::set_accrued_fee(env, fee_asset, fees);

    // 2. Collect payment: net to the receiver, fee into custody.
    transfer(env, pay_token, buyer, &config.funds_receiver, quote.net)?;
    transfer(env, pay_token, buyer, &env.current_contract_address(), quote.fee)?;
    Ok(())
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PresaleContract;

#[contractimpl]
impl PresaleContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Configure the sale. Callable once.
    ///
    /// Reads and caches the sale token's and the price feed's decimals; both
    /// are treated as fixed for the lifetime of the sale.
    pub fn initialize(
        env: Env,
        owner: Address,
        config: PresaleConfig,
        phases: Vec<Phase>,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();
        validate(&config, &phases)?;

        let sale_decimals = token::Client::new(&env, &config.sale_token).decimals();
        let feed_decimals = PriceFeedClient::new(&env, &config.price_feed).decimals();

        ownable::set_owner(&env, &owner);
        storage::set_config(&env, &config);
        storage::set_phases(&env, &phases);
        storage::set_decimals(&env, sale_decimals, feed_decimals);
        storage::set_total_sold(&env, 0);
        storage::set_current_phase(&env, 0);
        storage::bump_instance(&env);

        events::publish_initialized(
            &env,
            owner,
            config.sale_token,
            config.funds_receiver,
            config.starting_time,
            config.ending_time,
            config.max_supply,
        );

        Ok(())
    }

    // ── Purchases ───────────────────────────────────────────────────────────

    /// Buy with one of the two payment tokens. Returns the applied quote.
    pub fn purchase_with_payment_asset(
        env: Env,
        buyer: Address,
        asset: Address,
        amount: i128,
    ) -> Result<Quote, ContractError> {
        let config = load_config(&env)?;
        buyer.require_auth();

        require_can_buy(&env, &config, &buyer, amount)?;
        require_payment_asset(&config, &asset)?;

        let quote = price_payment_asset(&env, &config, &asset, amount)?;
        settle_purchase(
            &env,
            &config,
            &buyer,
            &asset,
            &Asset::Token(asset.clone()),
            &quote,
        )?;

        events::publish_tokens_purchased(&env, buyer, asset, quote.net, quote.tokens, quote.phase);

        Ok(quote)
    }

    /// Buy with the native coin, valued through the price feed.
    pub fn purchase_with_native(
        env: Env,
        buyer: Address,
        amount: i128,
    ) -> Result<Quote, ContractError> {
        let config = load_config(&env)?;
        buyer.require_auth();

        require_can_buy(&env, &config, &buyer, amount)?;

        let quote = price_native(&env, &config, amount)?;
        settle_purchase(
            &env,
            &config,
            &buyer,
            &config.native_asset,
            &Asset::Native,
            &quote,
        )?;

        events::publish_native_purchased(&env, buyer, amount, quote.tokens, quote.phase);

        Ok(quote)
    }

    // ── Settlement ──────────────────────────────────────────────────────────

    /// Transfer the caller's whole allocation once the sale has ended.
    ///
    /// The deposit is zeroed before the transfer; a second call fails with
    /// `NothingToClaim`.
    pub fn claim(env: Env, claimer: Address) -> Result<i128, ContractError> {
        let config = load_config(&env)?;
        claimer.require_auth();

        if env.ledger().timestamp() <= config.ending_time {
            return Err(ContractError::ClaimPeriodNotStarted);
        }

        let owed = storage::deposited(&env, &claimer);
        if owed <= 0 {
            return Err(ContractError::NothingToClaim);
        }
        storage::set_deposited(&env, &claimer, 0);

        transfer(
            &env,
            &config.sale_token,
            &env.current_contract_address(),
            &claimer,
            owed,
        )?;

        events::publish_tokens_claimed(&env, claimer, owed);

        Ok(owed)
    }

    /// Withdraw the fees accrued in `asset` to the owner after the sale ends.
    ///
    /// Returns the withdrawn amount; an empty counter returns `0` without a
    /// transfer.
    pub fn withdraw_fees(env: Env, caller: Address, asset: Asset) -> Result<i128, ContractError> {
        let config = load_config(&env)?;
        require_owner(&env, &caller)?;

        if env.ledger().timestamp() <= config.ending_time {
            return Err(ContractError::ClaimPeriodNotStarted);
        }

        let amount = storage::accrued_fee(&env, &asset);
        if amount <= 0 {
            return Ok(0);
        }
        storage::set_accrued_fee(&env, &asset, 0);

        let token = match &asset {
            Asset::Native => config.native_asset.clone(),
            Asset::Token(address) => address.clone(),
        };
        transfer(&env, &token, &env.current_contract_address(), &caller, amount)?;

        events::publish_fee_withdrawn(&env, caller, asset, amount);

        Ok(amount)
    }

    // ── Owner operations ────────────────────────────────────────────────────

    pub fn set_blacklisted(
        env: Env,
        caller: Address,
        account: Address,
        flag: bool,
    ) -> Result<(), ContractError> {
        load_config(&env)?;
        require_owner(&env, &caller)?;

        storage::set_blacklisted(&env, &account, flag);
        if flag {
            events::publish_blacklisted(&env, caller, account);
        } else {
            events::publish_unblacklisted(&env, caller, account);
        }

        Ok(())
    }

    /// Pull `amount` sale tokens from the owner into custody to fund claims.
    pub fn deposit_sale_tokens(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        let config = load_config(&env)?;
        require_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        transfer(
            &env,
            &config.sale_token,
            &caller,
            &env.current_contract_address(),
            amount,
        )?;

        events::publish_sale_tokens_deposited(&env, caller, amount);

        Ok(())
    }

    /// Send `amount` of any token held by the contract to the owner.
    ///
    /// No time restriction and no bookkeeping: this can drain sale tokens
    /// reserved for claims and fees not yet withdrawn.
    pub fn emergency_withdraw_token(
        env: Env,
        caller: Address,
        asset: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        load_config(&env)?;
        require_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        transfer(&env, &asset, &env.current_contract_address(), &caller, amount)?;

        events::publish_emergency_token_withdrawal(&env, caller, asset, amount);

        Ok(())
    }

    /// Send the contract's whole native balance to the owner. Returns it.
    pub fn emergency_withdraw_native(env: Env, caller: Address) -> Result<i128, ContractError> {
        let config = load_config(&env)?;
        require_owner(&env, &caller)?;

        let contract = env.current_contract_address();
        let balance = token::Client::new(&env, &config.native_asset).balance(&contract);
        transfer(&env, &config.native_asset, &contract, &caller, balance)?;

        events::publish_emergency_native_withdrawal(&env, caller, config.native_asset, balance);

        Ok(balance)
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    /// Propose a new owner. The proposed address must call `accept_owner`.
    pub fn propose_owner(env: Env, caller: Address, new_owner: Address) -> Result<(), ContractError> {
        load_config(&env)?;
        caller.require_auth();
        ownable::propose_owner(&env, &caller, &new_owner)?;

        events::publish_owner_transfer_proposed(&env, caller, new_owner);

        Ok(())
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        load_config(&env)?;
        new_owner.require_auth();
        let old_owner = ownable::accept_owner(&env, &new_owner)?;

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        load_config(&env)?;
        caller.require_auth();
        let cancelled = ownable::cancel_owner_transfer(&env, &caller)?;

        events::publish_owner_transfer_cancelled(&env, caller, cancelled);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        ownable::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        ownable::get_pending_owner(&env)
    }

    pub fn get_config(env: Env) -> Result<PresaleConfig, ContractError> {
        load_config(&env)
    }

    pub fn get_phases(env: Env) -> Result<Vec<Phase>, ContractError> {
        storage::get_phases(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_phase(env: Env, index: u32) -> Result<Phase, ContractError> {
        phase_at(&env, index)
    }

    pub fn current_phase(env: Env) -> u32 {
        storage::current_phase(&env)
    }

    pub fn total_sold(env: Env) -> i128 {
        storage::total_sold(&env)
    }

    /// Sale-token units `account` can claim after the sale.
    pub fn deposited_of(env: Env, account: Address) -> i128 {
        storage::deposited(&env, &account)
    }

    pub fn accrued_fee(env: Env, asset: Asset) -> i128 {
        storage::accrued_fee(&env, &asset)
    }

    pub fn is_blacklisted(env: Env, account: Address) -> bool {
        storage::is_blacklisted(&env, &account)
    }

    /// `true` while the ledger time is inside the sale window.
    pub fn is_active(env: Env) -> bool {
        match storage::get_config(&env) {
            Some(config) => {
                let now = env.ledger().timestamp();
                now >= config.starting_time && now <= config.ending_time
            }
            None => false,
        }
    }

    /// Latest round from the configured price feed, unfiltered, so callers
    /// can judge its age from `updated_at`.
    pub fn oracle_price(env: Env) -> Result<RoundData, ContractError> {
        let config = load_config(&env)?;
        Ok(PriceFeedClient::new(&env, &config.price_feed).latest_round_data())
    }

    /// Price a payment-token purchase at the active phase without buying.
    pub fn quote_payment_asset(
        env: Env,
        asset: Address,
        amount: i128,
    ) -> Result<Quote, ContractError> {
        let config = load_config(&env)?;
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        require_payment_asset(&config, &asset)?;
        price_payment_asset(&env, &config, &asset, amount)
    }

    /// Price a native purchase at the active phase without buying.
    pub fn quote_native(env: Env, amount: i128) -> Result<Quote, ContractError> {
        let config = load_config(&env)?;
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        price_native(&env, &config, amount)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
