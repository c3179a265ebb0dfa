//! Contract-specific error types
//!
//! Error taxonomy for ledger, vault, pause and composition operations.
//! Every failure is terminal for the operation that raised it and leaves
//! all state exactly as it was before the call.

use std::fmt;

use alloy_primitives::{Address, U256};
use thiserror::Error;
use vault_types::errors::NumericError;
use vault_types::ids::PauseKey;

/// Balance book errors, raised by the share ledger and asset ledgers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        account: Address,
        required: U256,
        available: U256,
    },

    #[error("Insufficient allowance from {owner} to {spender}: required {required}, available {available}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        required: U256,
        available: U256,
    },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,

    #[error("Transfer rejected: {reason}")]
    Rejected { reason: String },
}

/// Which capacity bound a request was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Deposit,
    Mint,
    Withdraw,
    Redeem,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Limit::Deposit => "maxDeposit",
            Limit::Mint => "maxMint",
            Limit::Withdraw => "maxWithdraw",
            Limit::Redeem => "maxRedeem",
        };
        f.write_str(name)
    }
}

/// Vault accounting errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VaultError {
    #[error("Limit exceeded: requested {requested}, {limit} is {max}")]
    LimitExceeded {
        limit: Limit,
        requested: U256,
        max: U256,
    },

    #[error("Allowance exceeded: {spender} may spend {available} shares of {owner}, required {required}")]
    AllowanceExceeded {
        owner: Address,
        spender: Address,
        required: U256,
        available: U256,
    },

    #[error("Asset transfer failed: {0}")]
    Transfer(#[from] LedgerError),

    #[error("Share ledger error: {0}")]
    Shares(LedgerError),

    #[error("Asset mismatch: vault accounts in {expected}, ledger holds {actual}")]
    AssetMismatch { expected: Address, actual: Address },

    #[error("Math error: {0}")]
    Math(#[from] NumericError),

    #[error("Reentrancy detected")]
    Reentrancy,

    #[error("Extension hook failed: {reason}")]
    Hook { reason: String },
}

/// Scope a pause flag applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PauseScope {
    Global,
    Key(PauseKey),
}

impl PauseScope {
    pub fn of(key: Option<&PauseKey>) -> Self {
        key.map_or(PauseScope::Global, |k| PauseScope::Key(k.clone()))
    }
}

impl fmt::Display for PauseScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PauseScope::Global => f.write_str("global"),
            PauseScope::Key(key) => write!(f, "key {}", key),
        }
    }
}

/// Pause state precondition errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PauseError {
    #[error("Already paused ({scope})")]
    AlreadyPaused { scope: PauseScope },

    #[error("Not paused ({scope})")]
    NotPaused { scope: PauseScope },
}

/// Role management errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("Not admin: {caller}")]
    NotAdmin { caller: Address },

    #[error("Primary admin seat is protected: {target}")]
    ProtectedAdmin { target: Address },
}

/// Errors from the pause-gated vault composition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuardError {
    #[error("Unauthorized: {caller} lacks a pausing role")]
    Unauthorized { caller: Address },

    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    #[error("Pause error: {0}")]
    Pause(#[from] PauseError),

    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),
}

/// Configuration loading errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid vault config: {0}")]
    Parse(String),

    #[error("Invalid vault config: {field} must be a non-zero address")]
    ZeroAddress { field: &'static str },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
