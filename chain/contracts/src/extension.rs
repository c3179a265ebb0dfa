//! Vault extension points
//!
//! A composing implementation customises the vault through
//! [`VaultExtension`]: where `totalAssets` comes from, per-receiver caps,
//! and side effects at two fixed points in the deposit and withdraw
//! sequences. The vault guarantees when each hook runs, not what it does.
//!
//! Hooks see the share book as it stands at their point in the sequence
//! but cannot change it.
//!
//! Hooks run inside the vault's transaction. Returning an error aborts
//! the whole operation and rolls back every ledger, including changes
//! the hook itself made through `ledger`.

use alloy_primitives::{Address, U256};

use crate::errors::VaultError;
use crate::ledger::AssetLedger;
use crate::token::ShareLedger;

pub trait VaultExtension {
    /// Assets under management, backing the outstanding shares.
    ///
    /// Defaults to the vault's balance on the asset ledger.
    fn total_assets(&self, ledger: &dyn AssetLedger, vault: Address) -> U256 {
        ledger.balance_of(&vault)
    }

    /// Additional cap on assets `receiver` may deposit.
    fn max_deposit(&self, _receiver: &Address) -> U256 {
        U256::MAX
    }

    /// Additional cap on shares `receiver` may mint.
    fn max_mint(&self, _receiver: &Address) -> U256 {
        U256::MAX
    }

    /// Runs after assets are pulled in and shares minted.
    fn after_deposit(
        &mut self,
        _ledger: &mut dyn AssetLedger,
        _book: &ShareLedger,
        _vault: Address,
        _receiver: Address,
        _assets: U256,
        _shares: U256,
    ) -> Result<(), VaultError> {
        Ok(())
    }

    /// Runs after any share allowance is spent, before shares are burned
    /// and assets sent out.
    fn before_withdraw(
        &mut self,
        _ledger: &mut dyn AssetLedger,
        _book: &ShareLedger,
        _vault: Address,
        _owner: Address,
        _assets: U256,
        _shares: U256,
    ) -> Result<(), VaultError> {
        Ok(())
    }
}

/// Extension with every hook left at its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Passive;

impl VaultExtension for Passive {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;

    #[test]
    fn test_passive_defaults() {
        let vault = Address::repeat_byte(0xee);
        let mut ledger = MemoryLedger::new(Address::repeat_byte(0xaa));
        ledger.mint(vault, U256::from(42u64)).unwrap();

        let book = ShareLedger::new();
        let mut ext = Passive;
        assert_eq!(ext.total_assets(&ledger, vault), U256::from(42u64));
        assert_eq!(ext.max_deposit(&Address::ZERO), U256::MAX);
        assert_eq!(ext.max_mint(&Address::ZERO), U256::MAX);
        assert!(ext
            .after_deposit(&mut ledger, &book, vault, Address::ZERO, U256::ZERO, U256::ZERO)
            .is_ok());
        assert!(ext
            .before_withdraw(&mut ledger, &book, vault, Address::ZERO, U256::ZERO, U256::ZERO)
            .is_ok());
    }
}
