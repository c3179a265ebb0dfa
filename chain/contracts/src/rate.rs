//! Share/asset exchange rate
//!
//! The rate is never stored. It is read from the current `totalAssets`
//! and share supply at the start of every conversion, so it moves in
//! lock-step with both.
//!
//! Rounding always favours the vault:
//! - deposit and redeem round the user's proceeds down
//! - mint and withdraw round the user's cost up

use alloy_primitives::U256;
use vault_types::errors::NumericError;
use vault_types::numeric::{mul_div_down, mul_div_up};

/// Snapshot of the two quantities that define the exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate {
    pub total_assets: U256,
    pub total_shares: U256,
}

impl ExchangeRate {
    pub fn new(total_assets: U256, total_shares: U256) -> Self {
        Self {
            total_assets,
            total_shares,
        }
    }

    /// Shares worth `assets`, rounded down.
    ///
    /// 1:1 while no shares exist, and also while shares exist but the
    /// vault holds no assets.
    pub fn convert_to_shares(&self, assets: U256) -> Result<U256, NumericError> {
        if self.total_shares.is_zero() || self.total_assets.is_zero() {
            return Ok(assets);
        }
        mul_div_down(assets, self.total_shares, self.total_assets)
    }

    /// Assets worth `shares`, rounded down. 1:1 while no shares exist.
    pub fn convert_to_assets(&self, shares: U256) -> Result<U256, NumericError> {
        if self.total_shares.is_zero() {
            return Ok(shares);
        }
        mul_div_down(shares, self.total_assets, self.total_shares)
    }

    /// Shares minted for depositing `assets`.
    pub fn preview_deposit(&self, assets: U256) -> Result<U256, NumericError> {
        self.convert_to_shares(assets)
    }

    /// Assets charged for minting `shares`, rounded up.
    pub fn preview_mint(&self, shares: U256) -> Result<U256, NumericError> {
        if self.total_shares.is_zero() {
            return Ok(shares);
        }
        mul_div_up(shares, self.total_assets, self.total_shares)
    }

    /// Shares burned for withdrawing `assets`, rounded up.
    pub fn preview_withdraw(&self, assets: U256) -> Result<U256, NumericError> {
        if self.total_shares.is_zero() || self.total_assets.is_zero() {
            return Ok(assets);
        }
        mul_div_up(assets, self.total_shares, self.total_assets)
    }

    /// Assets paid out for redeeming `shares`.
    pub fn preview_redeem(&self, shares: U256) -> Result<U256, NumericError> {
        self.convert_to_assets(shares)
    }
}
