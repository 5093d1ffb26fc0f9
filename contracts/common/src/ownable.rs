use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::CommonError;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

// ── Owner Registry ───────────────────────────────────────────────────────────

/// Records `owner` as the single owner. Callers must guard against
/// overwriting an existing owner; this only writes.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// Returns the current owner, if one has been recorded.
pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Returns the address proposed as the next owner, if any.
pub fn get_pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

/// Guard: fails unless `caller` is the recorded owner.
///
/// The caller must already have been authenticated via `require_auth()`.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), CommonError> {
    let owner = get_owner(env).ok_or(CommonError::NotInitialized)?;
    if *caller != owner {
        return Err(CommonError::AccessDenied);
    }
    Ok(())
}

// ── Two-step handoff ─────────────────────────────────────────────────────────

/// Propose `new_owner` as the next owner. Only the current owner may propose;
/// a later proposal replaces an earlier one.
pub fn propose_owner(env: &Env, caller: &Address, new_owner: &Address) -> Result<(), CommonError> {
    require_owner(env, caller)?;
    env.storage().instance().set(&PENDING_OWNER, new_owner);
    Ok(())
}

/// Complete a pending handoff. `candidate` must be the proposed address.
///
/// Returns the previous owner.
pub fn accept_owner(env: &Env, candidate: &Address) -> Result<Address, CommonError> {
    let pending = get_pending_owner(env).ok_or(CommonError::NoPendingTransfer)?;
    if *candidate != pending {
        return Err(CommonError::AccessDenied);
    }
    let previous = get_owner(env).ok_or(CommonError::NotInitialized)?;

    set_owner(env, candidate);
    env.storage().instance().remove(&PENDING_OWNER);
    Ok(previous)
}

/// Drop a pending handoff. Only the current owner may cancel.
///
/// Returns the address whose proposal was withdrawn.
pub fn cancel_owner_transfer(env: &Env, caller: &Address) -> Result<Address, CommonError> {
    require_owner(env, caller)?;
    let pending = get_pending_owner(env).ok_or(CommonError::NoPendingTransfer)?;
    env.storage().instance().remove(&PENDING_OWNER);
    Ok(pending)
}
