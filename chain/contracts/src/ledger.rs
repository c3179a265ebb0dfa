//! Asset ledger collaborator
//!
//! The vault never owns the base asset's ledger; it only calls it through
//! [`AssetLedger`]. Implementations must either apply a transfer in full
//! or return an error with no change at all.

use alloy_primitives::{Address, U256};

use crate::errors::LedgerError;
use crate::token::TokenBook;

/// Fungible balance ledger for the vault's base asset.
///
/// The acting account is always explicit: `transfer` moves `from`'s own
/// funds, `transfer_from` spends `spender`'s allowance over `from`.
pub trait AssetLedger {
    /// Identifier of the asset this ledger keeps.
    fn asset_id(&self) -> Address;

    fn balance_of(&self, account: &Address) -> U256;

    fn allowance(&self, owner: &Address, spender: &Address) -> U256;

    fn approve(&mut self, owner: Address, spender: Address, amount: U256) -> Result<(), LedgerError>;

    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), LedgerError>;

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError>;
}

/// In-memory asset ledger backed by a [`TokenBook`].
#[derive(Debug, Clone)]
pub struct MemoryLedger {
    asset: Address,
    book: TokenBook,
}

impl MemoryLedger {
    pub fn new(asset: Address) -> Self {
        Self {
            asset,
            book: TokenBook::new(),
        }
    }

    /// Credit new units to `to` (faucet, yield accrual).
    pub fn mint(&mut self, to: Address, amount: U256) -> Result<(), LedgerError> {
        self.book.mint(to, amount)
    }

    /// Remove units from `from` (loss, slashing).
    pub fn burn(&mut self, from: Address, amount: U256) -> Result<(), LedgerError> {
        self.book.burn(from, amount)
    }

    pub fn total_supply(&self) -> U256 {
        self.book.total_supply()
    }
}

impl AssetLedger for MemoryLedger {
    fn asset_id(&self) -> Address {
        self.asset
    }

    fn balance_of(&self, account: &Address) -> U256 {
        self.book.balance_of(account)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.book.allowance(owner, spender)
    }

    fn approve(&mut self, owner: Address, spender: Address, amount: U256) -> Result<(), LedgerError> {
        self.book.approve(owner, spender, amount);
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), LedgerError> {
        self.book.transfer(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        // Check the balance first so a failed move does not consume allowance
        let available = self.book.balance_of(&from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                required: amount,
                available,
            });
        }
        self.book.spend_allowance(from, spender, amount)?;
        self.book.transfer(from, to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> Address {
        Address::repeat_byte(0xaa)
    }

    fn user() -> Address {
        Address::repeat_byte(0x01)
    }

    fn vault() -> Address {
        Address::repeat_byte(0xee)
    }

    #[test]
    fn test_transfer_from_requires_allowance() {
        let mut ledger = MemoryLedger::new(asset());
        ledger.mint(user(), U256::from(100u64)).unwrap();

        let result = ledger.transfer_from(vault(), user(), vault(), U256::from(10u64));
        assert!(matches!(result, Err(LedgerError::InsufficientAllowance { .. })));
        assert_eq!(ledger.balance_of(&user()), U256::from(100u64));
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut ledger = MemoryLedger::new(asset());
        ledger.mint(user(), U256::from(100u64)).unwrap();
        ledger.approve(user(), vault(), U256::from(60u64)).unwrap();

        ledger
            .transfer_from(vault(), user(), vault(), U256::from(40u64))
            .unwrap();
        assert_eq!(ledger.balance_of(&vault()), U256::from(40u64));
        assert_eq!(ledger.allowance(&user(), &vault()), U256::from(20u64));
    }

    #[test]
    fn test_transfer_from_insufficient_balance_keeps_allowance() {
        let mut ledger = MemoryLedger::new(asset());
        ledger.mint(user(), U256::from(5u64)).unwrap();
        ledger.approve(user(), vault(), U256::from(60u64)).unwrap();

        let result = ledger.transfer_from(vault(), user(), vault(), U256::from(10u64));
        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
        assert_eq!(ledger.allowance(&user(), &vault()), U256::from(60u64));
    }

    #[test]
    fn test_asset_id() {
        let ledger = MemoryLedger::new(asset());
        assert_eq!(ledger.asset_id(), asset());
    }
}
