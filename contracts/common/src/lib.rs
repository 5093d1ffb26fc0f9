//! Shared utilities and error types for the presale contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: error codes shared by every contract in the suite.
//! - [`ownable`]: the single-owner gate with a two-step ownership handoff.
//!
//! Contract-specific errors convert from [`CommonError`] so each contract
//! keeps one error enum at its public boundary.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod ownable;

pub use ownable::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by every contract in the suite.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 1 – 9   | Lifecycle / initialisation    |
/// | 10 – 19 | Authentication & authorisation|
/// | 40 – 49 | Contract state                |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    /// No owner has been recorded yet.
    NotInitialized = 1,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller is not the owner (or not the pending owner when
    /// accepting a handoff).
    AccessDenied = 10,

    // ── Contract state (40–49) ───────────────────────────────
    /// An ownership handoff was accepted or cancelled while none was
    /// pending.
    NoPendingTransfer = 41,
}
