//! Vault Contract Logic
//!
//! This crate implements the contract layer for a tokenized vault:
//! share/asset conversion, the deposit/mint/withdraw/redeem state machine,
//! and the global / keyed pause gate that composing contracts put in
//! front of it.
//!
//! # Modules
//! - `errors`: Contract-specific error types
//! - `events`: Contract events
//! - `token`: ERC-20-style balance book (the share ledger)
//! - `ledger`: Asset ledger collaborator trait and in-memory ledger
//! - `rate`: Exchange rate and directional rounding
//! - `extension`: Hook and cap extension points
//! - `config`: Vault configuration
//! - `security`: Reentrancy guard, access control, pause gate
//! - `vault`: Vault accounting
//! - `guarded`: Pause-gated vault composition
//!
//! # Version
//! v0.1.0 — Initial implementation

pub mod errors;
pub mod events;
pub mod token;
pub mod ledger;
pub mod rate;
pub mod extension;
pub mod config;
pub mod security;
pub mod vault;
pub mod guarded;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
