//! Identifier types for vault entities
//!
//! Vault instances use UUID v7 so that logs and event streams from many
//! vaults sort chronologically by creation. Accounts are plain 20-byte
//! addresses, the same width the asset ledger uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use alloy_primitives::Address;

/// Unique identifier for a vault instance
///
/// Each vault owns exactly one state record; the id tags its log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultId(Uuid);

impl VaultId {
    /// Create a new VaultId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VaultId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque key naming a partially pausable hazard or category
///
/// Format is free-form (e.g. "vault.deposit"); keys compare byte-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PauseKey(String);

impl PauseKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PauseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PauseKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PauseKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_id_creation() {
        let id1 = VaultId::new();
        let id2 = VaultId::new();
        assert_ne!(id1, id2, "VaultIds should be unique");
    }

    #[test]
    fn test_vault_id_serialization() {
        let id = VaultId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: VaultId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_vault_id_is_v7() {
        let id = VaultId::new();
        assert_eq!(id.as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_pause_key_equality() {
        assert_eq!(PauseKey::from("vault.deposit"), PauseKey::new("vault.deposit"));
        assert_ne!(PauseKey::from("vault.deposit"), PauseKey::from("vault.withdraw"));
    }

    #[test]
    fn test_pause_key_serialization() {
        let key = PauseKey::from("oracle.stale");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"oracle.stale\"");

        let deserialized: PauseKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, deserialized);
    }
}
