//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the presale.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key         | Type            | Description                          |
//! |-------------|-----------------|--------------------------------------|
//! | `CONFIG`    | `PresaleConfig` | Immutable sale parameters            |
//! | `PHASES`    | `Vec<Phase>`    | Immutable three-entry phase table    |
//! | `SALE_DEC`  | `u32`           | Sale-token decimals, read at init    |
//! | `FEED_DEC`  | `u32`           | Price-feed decimals, read at init    |
//! | `TOT_SOLD`  | `i128`          | Cumulative sale-token units sold     |
//! | `CUR_PHASE` | `u32`           | Active phase index                   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type   | Description                     |
//! |----------------------|--------|---------------------------------|
//! | `(DEPOSIT, account)` | `i128` | Sale-token units owed           |
//! | `(BLKLIST, account)` | `bool` | Purchase ban                    |
//! | `(FEE, asset)`       | `i128` | Fees accrued and not withdrawn  |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days.

use soroban_sdk::{symbol_short, Address, Env, IntoVal, Symbol, TryFromVal, Val, Vec};

use crate::types::{Asset, Phase, PresaleConfig};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const PHASES: Symbol = symbol_short!("PHASES");
const SALE_DECIMALS: Symbol = symbol_short!("SALE_DEC");
const FEED_DECIMALS: Symbol = symbol_short!("FEED_DEC");
const TOTAL_SOLD: Symbol = symbol_short!("TOT_SOLD");
const CURRENT_PHASE: Symbol = symbol_short!("CUR_PHASE");

// Per-account and per-asset persistent storage uses tuple keys: (prefix, id)
const DEPOSIT: Symbol = symbol_short!("DEPOSIT");
const BLACKLIST: Symbol = symbol_short!("BLKLIST");
const FEE: Symbol = symbol_short!("FEE");

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn set_config(env: &Env, config: &PresaleConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn get_config(env: &Env) -> Option<PresaleConfig> {
    env.storage().instance().get(&CONFIG)
}

pub fn set_phases(env: &Env, phases: &Vec<Phase>) {
    env.storage().instance().set(&PHASES, phases);
}

pub fn get_phases(env: &Env) -> Option<Vec<Phase>> {
    env.storage().instance().get(&PHASES)
}

pub fn set_decimals(env: &Env, sale_decimals: u32, feed_decimals: u32) {
    env.storage().instance().set(&SALE_DECIMALS, &sale_decimals);
    env.storage().instance().set(&FEED_DECIMALS, &feed_decimals);
}

pub fn sale_decimals(env: &Env) -> Option<u32> {
    env.storage().instance().get(&SALE_DECIMALS)
}

pub fn feed_decimals(env: &Env) -> Option<u32> {
    env.storage().instance().get(&FEED_DECIMALS)
}

pub fn total_sold(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_SOLD).unwrap_or(0)
}

pub fn set_total_sold(env: &Env, amount: i128) {
    env.storage().instance().set(&TOTAL_SOLD, &amount);
}

pub fn current_phase(env: &Env) -> u32 {
    env.storage().instance().get(&CURRENT_PHASE).unwrap_or(0)
}

pub fn set_current_phase(env: &Env, index: u32) {
    env.storage().instance().set(&CURRENT_PHASE, &index);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn read_persistent<K, V>(env: &Env, key: &K) -> Option<V>
where
    K: IntoVal<Env, Val>,
    V: TryFromVal<Env, Val>,
{
    let value: Option<V> = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage().persistent().extend_ttl(
            key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
    value
}

fn write_persistent<K, V>(env: &Env, key: &K, value: &V)
where
    K: IntoVal<Env, Val>,
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn deposited(env: &Env, account: &Address) -> i128 {
    read_persistent(env, &(DEPOSIT, account.clone())).unwrap_or(0)
}

/// Store the amount owed to `account`; a zero balance removes the entry.
pub fn set_deposited(env: &Env, account: &Address, amount: i128) {
    let key = (DEPOSIT, account.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        write_persistent(env, &key, &amount);
    }
}

pub fn is_blacklisted(env: &Env, account: &Address) -> bool {
    read_persistent(env, &(BLACKLIST, account.clone())).unwrap_or(false)
}

pub fn set_blacklisted(env: &Env, account: &Address, flag: bool) {
    let key = (BLACKLIST, account.clone());
    if flag {
        write_persistent(env, &key, &true);
    } else {
        env.storage().persistent().remove(&key);
    }
}

pub fn accrued_fee(env: &Env, asset: &Asset) -> i128 {
    read_persistent(env, &(FEE, asset.clone())).unwrap_or(0)
}

/// Store the fees held for `asset`; a zero counter removes the entry.
pub fn set_accrued_fee(env: &Env, asset: &Asset, amount: i128) {
    let key = (FEE, asset.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        write_persistent(env, &key, &amount);
    }
}
