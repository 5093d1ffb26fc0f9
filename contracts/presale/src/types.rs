//! # Types
//!
//! Data structures shared by the presale entry points, the pricing helpers
//! and the event payloads.
//!
//! The phase table and [`PresaleConfig`] are written once by `initialize` and
//! never mutated. Everything that changes during the sale (sold counter,
//! active phase, deposits, fee ledger, blacklist) lives under its own
//! storage key so a purchase rewrites only what it touches.

use soroban_sdk::{contracttype, Address, Vec};

/// Number of entries in the phase table.
pub const PHASE_COUNT: u32 = 3;

/// Index of the final phase; the active index never goes past it.
pub const LAST_PHASE: u32 = PHASE_COUNT - 1;

/// One pricing tier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Phase {
    /// Cumulative sale-token units sellable up to the end of this phase.
    pub supply_cap: i128,
    /// Reference-currency price per whole sale token, scaled by `1e6`.
    pub price: i128,
    /// Ledger timestamp after which the phase is forced forward.
    pub deadline: u64,
}

/// Immutable sale parameters supplied to `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresaleConfig {
    /// Token handed out on `claim`.
    pub sale_token: Address,
    /// Token contract of the native coin.
    pub native_asset: Address,
    /// Price feed quoting the native coin in the reference currency.
    pub price_feed: Address,
    /// Receives the net (post-fee) proceeds of every purchase.
    pub funds_receiver: Address,
    /// The two stable payment tokens accepted at face value.
    pub payment_assets: Vec<Address>,
    pub starting_time: u64,
    pub ending_time: u64,
    /// Ceiling on `total_sold`.
    pub max_supply: i128,
    /// Purchase fee in basis points.
    pub fee_bps: u32,
}

/// Identifier of an asset the contract collects fees in.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asset {
    /// The native coin, routed through `PresaleConfig::native_asset`.
    Native,
    /// A payment token.
    Token(Address),
}

/// Pricing of a purchase at the phase active when it was computed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Quote {
    pub fee: i128,
    pub net: i128,
    /// Sale-token base units the buyer is credited with.
    pub tokens: i128,
    /// Phase whose price was applied.
    pub phase: u32,
}
