#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::types::Asset;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the sale is configured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub sale_token: Address,
    pub funds_receiver: Address,
    pub starting_time: u64,
    pub ending_time: u64,
    pub max_supply: i128,
    pub timestamp: u64,
}

/// Fired on a purchase paid in a payment token. `amount` is the net paid.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensPurchasedEvent {
    pub buyer: Address,
    pub asset: Address,
    pub amount: i128,
    pub tokens: i128,
    pub phase: u32,
    pub timestamp: u64,
}

/// Fired on a purchase paid in the native coin. `amount` is the gross paid.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NativePurchasedEvent {
    pub buyer: Address,
    pub amount: i128,
    pub tokens: i128,
    pub phase: u32,
    pub timestamp: u64,
}

/// Fired when a purchase moves the sale into the next phase.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhaseAdvancedEvent {
    pub from: u32,
    pub to: u32,
    pub total_sold: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensClaimedEvent {
    pub claimer: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeWithdrawnEvent {
    pub owner: Address,
    pub asset: Asset,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired on both blacklist directions; the topic tells them apart.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlacklistEvent {
    pub owner: Address,
    pub account: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleTokensDepositedEvent {
    pub owner: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawalEvent {
    pub owner: Address,
    pub asset: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    sale_token: Address,
    funds_receiver: Address,
    starting_time: u64,
    ending_time: u64,
    max_supply: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            sale_token,
            funds_receiver,
            starting_time,
            ending_time,
            max_supply,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tokens_purchased(
    env: &Env,
    buyer: Address,
    asset: Address,
    amount: i128,
    tokens: i128,
    phase: u32,
) {
    env.events().publish(
        (symbol_short!("BUY_TOKEN"), buyer.clone()),
        TokensPurchasedEvent {
            buyer,
            asset,
            amount,
            tokens,
            phase,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_native_purchased(env: &Env, buyer: Address, amount: i128, tokens: i128, phase: u32) {
    env.events().publish(
        (symbol_short!("BUY_NATIV"), buyer.clone()),
        NativePurchasedEvent {
            buyer,
            amount,
            tokens,
            phase,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_phase_advanced(env: &Env, from: u32, to: u32, total_sold: i128) {
    env.events().publish(
        (symbol_short!("PHASE_ADV"),),
        PhaseAdvancedEvent {
            from,
            to,
            total_sold,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tokens_claimed(env: &Env, claimer: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLAIMED"), claimer.clone()),
        TokensClaimedEvent {
            claimer,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_fee_withdrawn(env: &Env, owner: Address, asset: Asset, amount: i128) {
    env.events().publish(
        (symbol_short!("FEE_WDRAW"), owner.clone()),
        FeeWithdrawnEvent {
            owner,
            asset,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_blacklisted(env: &Env, owner: Address, account: Address) {
    env.events().publish(
        (symbol_short!("BLKLIST"), account.clone()),
        BlacklistEvent {
            owner,
            account,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unblacklisted(env: &Env, owner: Address, account: Address) {
    env.events().publish(
        (symbol_short!("UNBLKLIST"), account.clone()),
        BlacklistEvent {
            owner,
            account,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_sale_tokens_deposited(env: &Env, owner: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("SALE_DEP"), owner.clone()),
        SaleTokensDepositedEvent {
            owner,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_token_withdrawal(env: &Env, owner: Address, asset: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_TOK"), owner.clone()),
        EmergencyWithdrawalEvent {
            owner,
            asset,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_native_withdrawal(env: &Env, owner: Address, asset: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_NAT"), owner.clone()),
        EmergencyWithdrawalEvent {
            owner,
            asset,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
