//! Contract events
//!
//! Events are immutable records emitted by contract operations.
//! Field order is part of the interface: indexers decode positionally.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use vault_types::ids::PauseKey;

/// Assets pulled into the vault and shares minted to `receiver`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub caller: Address,
    pub receiver: Address,
    pub assets: U256,
    pub shares: U256,
}

/// Shares burned from `owner` and assets sent to `receiver`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdraw {
    pub caller: Address,
    pub receiver: Address,
    pub owner: Address,
    pub assets: U256,
    pub shares: U256,
}

/// Share movement; `from` is zero on mint, `to` is zero on burn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

/// Share allowance set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paused {
    pub account: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unpaused {
    pub account: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PausedWithKey {
    pub account: Address,
    pub key: PauseKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpausedWithKey {
    pub account: Address,
    pub key: PauseKey,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    Deposit(Deposit),
    Withdraw(Withdraw),
    Transfer(Transfer),
    Approval(Approval),
    Paused(Paused),
    Unpaused(Unpaused),
    PausedWithKey(PausedWithKey),
    UnpausedWithKey(UnpausedWithKey),
}
