//! ERC-20-style balance and allowance book
//!
//! `TokenBook` is the bookkeeping core shared by the vault's share ledger
//! and the in-memory asset ledger. It performs no authorization: callers
//! decide who may mint, burn or move balances.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};

use crate::errors::LedgerError;

/// Supply, balances and allowances for a single fungible token.
///
/// An allowance of exactly `U256::MAX` is infinite and never decremented.
#[derive(Debug, Clone, Default)]
pub struct TokenBook {
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

/// The vault's share ledger.
pub type ShareLedger = TokenBook;

impl TokenBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or(U256::ZERO)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Set the allowance of `spender` over `owner`'s balance.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    /// Create `amount` new units in `to`'s balance.
    pub fn mint(&mut self, to: Address, amount: U256) -> Result<(), LedgerError> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        // Balances never exceed supply, so the credit cannot overflow
        let balance = self.balance_of(&to) + amount;

        self.total_supply = supply;
        self.balances.insert(to, balance);
        Ok(())
    }

    /// Destroy `amount` units from `from`'s balance.
    pub fn burn(&mut self, from: Address, amount: U256) -> Result<(), LedgerError> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                required: amount,
                available,
            });
        }

        self.set_balance(from, available - amount);
        self.total_supply -= amount;
        Ok(())
    }

    /// Move `amount` from `from` to `to`.
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), LedgerError> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }

        self.set_balance(from, available - amount);
        let credited = self.balance_of(&to) + amount;
        self.set_balance(to, credited);
        Ok(())
    }

    /// Consume `amount` of `spender`'s allowance over `owner`.
    ///
    /// Leaves an infinite (`U256::MAX`) allowance untouched.
    pub fn spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let available = self.allowance(&owner, &spender);
        if available == U256::MAX {
            return Ok(());
        }
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner,
                spender,
                required: amount,
                available,
            });
        }
        self.approve(owner, spender, available - amount);
        Ok(())
    }

    fn set_balance(&mut self, account: Address, amount: U256) {
        if amount.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::repeat_byte(0xa1)
    }

    fn bob() -> Address {
        Address::repeat_byte(0xb0)
    }

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    #[test]
    fn test_mint_increases_supply_and_balance() {
        let mut book = TokenBook::new();
        book.mint(alice(), u(100)).unwrap();
        book.mint(bob(), u(50)).unwrap();
        assert_eq!(book.total_supply(), u(150));
        assert_eq!(book.balance_of(&alice()), u(100));
        assert_eq!(book.balance_of(&bob()), u(50));
    }

    #[test]
    fn test_mint_overflow_leaves_book_unchanged() {
        let mut book = TokenBook::new();
        book.mint(alice(), U256::MAX).unwrap();
        assert_eq!(book.mint(bob(), u(1)), Err(LedgerError::Overflow));
        assert_eq!(book.balance_of(&bob()), U256::ZERO);
        assert_eq!(book.total_supply(), U256::MAX);
    }

    #[test]
    fn test_burn_insufficient() {
        let mut book = TokenBook::new();
        book.mint(alice(), u(10)).unwrap();
        let result = book.burn(alice(), u(11));
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                account: alice(),
                required: u(11),
                available: u(10),
            })
        );
        assert_eq!(book.total_supply(), u(10));
    }

    #[test]
    fn test_burn_reduces_supply() {
        let mut book = TokenBook::new();
        book.mint(alice(), u(10)).unwrap();
        book.burn(alice(), u(4)).unwrap();
        assert_eq!(book.balance_of(&alice()), u(6));
        assert_eq!(book.total_supply(), u(6));
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut book = TokenBook::new();
        book.mint(alice(), u(10)).unwrap();
        book.transfer(alice(), bob(), u(3)).unwrap();
        assert_eq!(book.balance_of(&alice()), u(7));
        assert_eq!(book.balance_of(&bob()), u(3));
        assert_eq!(book.total_supply(), u(10));
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let mut book = TokenBook::new();
        book.mint(alice(), u(10)).unwrap();
        book.transfer(alice(), alice(), u(10)).unwrap();
        assert_eq!(book.balance_of(&alice()), u(10));
    }

    #[test]
    fn test_spend_allowance_decrements() {
        let mut book = TokenBook::new();
        book.approve(alice(), bob(), u(10));
        book.spend_allowance(alice(), bob(), u(4)).unwrap();
        assert_eq!(book.allowance(&alice(), &bob()), u(6));
        book.spend_allowance(alice(), bob(), u(6)).unwrap();
        assert_eq!(book.allowance(&alice(), &bob()), U256::ZERO);
    }

    #[test]
    fn test_spend_allowance_insufficient() {
        let mut book = TokenBook::new();
        book.approve(alice(), bob(), u(3));
        let result = book.spend_allowance(alice(), bob(), u(4));
        assert!(matches!(result, Err(LedgerError::InsufficientAllowance { .. })));
        assert_eq!(book.allowance(&alice(), &bob()), u(3));
    }

    #[test]
    fn test_infinite_allowance_not_decremented() {
        let mut book = TokenBook::new();
        book.approve(alice(), bob(), U256::MAX);
        book.spend_allowance(alice(), bob(), u(1_000_000)).unwrap();
        assert_eq!(book.allowance(&alice(), &bob()), U256::MAX);
    }
}
