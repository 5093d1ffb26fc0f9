#![no_std]

//! Round-based price feed.
//!
//! Exposes the aggregator-style read interface the presale consumes
//! (`latest_round_data`, `decimals`) and lets its owner publish new answers.
//! Each published answer opens a new round stamped with the ledger time.


use common::{ownable, CommonError};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, String, Symbol};

// ── Storage keys ────────────────────────────────────────────────────────────────

const DECIMALS: Symbol = symbol_short!("DECIMALS");
const DESCRIPTION: Symbol = symbol_short!("DESC");
const LATEST_ROUND: Symbol = symbol_short!("ROUND");

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Highest precision a feed may declare; answers are scaled to 18 decimals
/// by consumers.
pub const MAX_DECIMALS: u32 = 18;

// ── Types ──────────────────────────────────────────────────────────────────────

/// One published round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    /// Signed fixed-point price with `decimals()` fractional digits.
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

/// Payload of the `ANSWER` event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnswerUpdatedEvent {
    pub round_id: u64,
    pub answer: i128,
    pub updated_at: u64,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AccessDenied | CommonError::NoPendingTransfer => {
                ContractError::Unauthorized
            }
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn publish_round(env: &Env, answer: i128) -> RoundData {
    let previous: u64 = env
        .storage()
        .instance()
        .get::<_, RoundData>(&LATEST_ROUND)
        .map(|r| r.round_id)
        .unwrap_or(0);
    let round_id = previous.saturating_add(1);
    let now = env.ledger().timestamp();

    let round = RoundData {
        round_id,
        answer,
        started_at: now,
        updated_at: now,
        answered_in_round: round_id,
    };
    env.storage().instance().set(&LATEST_ROUND, &round);

    #[allow(deprecated)]
    env.events().publish(
        (symbol_short!("ANSWER"),),
        AnswerUpdatedEvent {
            round_id,
            answer,
            updated_at: now,
        },
    );

    round
}

// ── Contract ───────────────────────────────────────────────────────────────────

#[contract]
pub struct PriceFeedContract;

#[contractimpl]
impl PriceFeedContract {
    /// Bootstrap the feed with its precision, a label and the first answer.
    pub fn initialize(
        env: Env,
        admin: Address,
        decimals: u32,
        description: String,
        answer: i128,
    ) -> Result<(), ContractError> {
        if ownable::get_owner(&env).is_some() {
            return Err(ContractError::AlreadyInitialized);
        }
        if decimals > MAX_DECIMALS {
            return Err(ContractError::InvalidInput);
        }

        ownable::set_owner(&env, &admin);
        env.storage().instance().set(&DECIMALS, &decimals);
        env.storage().instance().set(&DESCRIPTION, &description);
        publish_round(&env, answer);
        bump_instance(&env);
        Ok(())
    }

    /// Publish a new answer as the next round. Owner only.
    pub fn set_answer(env: Env, caller: Address, answer: i128) -> Result<RoundData, ContractError> {
        caller.require_auth();
        ownable::require_owner(&env, &caller)?;
        bump_instance(&env);
        Ok(publish_round(&env, answer))
    }

    pub fn latest_round_data(env: Env) -> Result<RoundData, ContractError> {
        let round = env
            .storage()
            .instance()
            .get(&LATEST_ROUND)
            .ok_or(ContractError::NotInitialized)?;
        bump_instance(&env);
        Ok(round)
    }

    pub fn decimals(env: Env) -> Result<u32, ContractError> {
        let decimals = env
            .storage()
            .instance()
            .get(&DECIMALS)
            .ok_or(ContractError::NotInitialized)?;
        bump_instance(&env);
        Ok(decimals)
    }

    pub fn description(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&DESCRIPTION)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        ownable::get_owner(&env).ok_or(ContractError::NotInitialized)
    }
}
