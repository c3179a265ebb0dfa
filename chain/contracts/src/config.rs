//! Vault configuration
//!
//! Loaded once at initialization; the asset is immutable afterwards.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Static parameters of a vault instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// The vault's own account on the asset ledger
    pub address: Address,
    /// Base asset the vault accounts in
    pub asset: Address,
    /// Cap on assets accepted per deposit call, for every receiver
    #[serde(default)]
    pub deposit_cap: Option<U256>,
    /// Cap on shares issued per mint call, for every receiver
    #[serde(default)]
    pub mint_cap: Option<U256>,
}

impl VaultConfig {
    /// Uncapped configuration.
    pub fn new(address: Address, asset: Address) -> Self {
        Self {
            address,
            asset,
            deposit_cap: None,
            mint_cap: None,
        }
    }

    pub fn with_deposit_cap(mut self, cap: U256) -> Self {
        self.deposit_cap = Some(cap);
        self
    }

    pub fn with_mint_cap(mut self, cap: U256) -> Self {
        self.mint_cap = Some(cap);
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: VaultConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address == Address::ZERO {
            return Err(ConfigError::ZeroAddress { field: "address" });
        }
        if self.asset == Address::ZERO {
            return Err(ConfigError::ZeroAddress { field: "asset" });
        }
        Ok(())
    }
}
