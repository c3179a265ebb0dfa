//! Vault — share accounting over a single base asset
//!
//! Converts between asset and share amounts and executes the four vault
//! actions:
//! - `deposit` / `mint`: pull assets from the caller, mint shares
//! - `withdraw` / `redeem`: burn shares from the owner, send assets out
//!
//! Every action runs as one transaction. Limit check, conversion,
//! allowance spend, extension hook, ledger movements and events either
//! all take effect or none do.

use alloy_primitives::{Address, U256};
use tracing::{debug, warn};
use vault_types::ids::VaultId;

use crate::config::VaultConfig;
use crate::errors::{ConfigError, LedgerError, Limit, VaultError};
use crate::events::{Approval, ContractEvent, Deposit, Transfer, Withdraw};
use crate::extension::{Passive, VaultExtension};
use crate::ledger::AssetLedger;
use crate::rate::ExchangeRate;
use crate::security::ReentrancyGuard;
use crate::token::ShareLedger;

/// Tokenized vault over one base asset.
///
/// The vault owns its share ledger and borrows the asset ledger for the
/// duration of each call. Mutating entry points work on a staged copy of
/// the asset ledger and write it back only on success.
#[derive(Debug)]
pub struct Vault<X = Passive> {
    id: VaultId,
    config: VaultConfig,
    /// Outstanding shares, balances and share allowances
    shares: ShareLedger,
    extension: X,
    /// Security: reentrancy guard
    reentrancy_guard: ReentrancyGuard,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

/// State restored when an action fails part-way.
struct Checkpoint<X> {
    shares: ShareLedger,
    extension: X,
    events: usize,
}

impl Vault<Passive> {
    /// Create a vault with no extension behaviour.
    pub fn new(config: VaultConfig) -> Result<Self, ConfigError> {
        Self::with_extension(config, Passive)
    }
}

impl<X: VaultExtension + Clone> Vault<X> {
    /// Create a vault whose hooks and caps come from `extension`.
    pub fn with_extension(config: VaultConfig, extension: X) -> Result<Self, ConfigError> {
        config.validate()?;
        let vault = Self {
            id: VaultId::new(),
            config,
            shares: ShareLedger::new(),
            extension,
            reentrancy_guard: ReentrancyGuard::new(),
            events: Vec::new(),
        };
        debug!(vault = %vault.id, asset = %vault.config.asset, "Vault initialized");
        Ok(vault)
    }

    pub fn id(&self) -> VaultId {
        self.id
    }

    /// The vault's own account on the asset ledger.
    pub fn address(&self) -> Address {
        self.config.address
    }

    /// Base asset the vault accounts in.
    pub fn asset(&self) -> Address {
        self.config.asset
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn extension(&self) -> &X {
        &self.extension
    }

    // ───────────────────────── Conversion ─────────────────────────

    /// Assets backing the outstanding shares, as reported by the extension.
    pub fn total_assets(&self, ledger: &dyn AssetLedger) -> U256 {
        self.extension.total_assets(ledger, self.config.address)
    }

    pub fn total_shares(&self) -> U256 {
        self.shares.total_supply()
    }

    /// Current exchange rate against `ledger`.
    pub fn rate(&self, ledger: &dyn AssetLedger) -> Result<ExchangeRate, VaultError> {
        self.check_asset(ledger)?;
        Ok(ExchangeRate::new(
            self.total_assets(ledger),
            self.total_shares(),
        ))
    }

    pub fn convert_to_shares(&self, ledger: &dyn AssetLedger, assets: U256) -> Result<U256, VaultError> {
        Ok(self.rate(ledger)?.convert_to_shares(assets)?)
    }

    pub fn convert_to_assets(&self, ledger: &dyn AssetLedger, shares: U256) -> Result<U256, VaultError> {
        Ok(self.rate(ledger)?.convert_to_assets(shares)?)
    }

    pub fn preview_deposit(&self, ledger: &dyn AssetLedger, assets: U256) -> Result<U256, VaultError> {
        Ok(self.rate(ledger)?.preview_deposit(assets)?)
    }

    pub fn preview_mint(&self, ledger: &dyn AssetLedger, shares: U256) -> Result<U256, VaultError> {
        Ok(self.rate(ledger)?.preview_mint(shares)?)
    }

    pub fn preview_withdraw(&self, ledger: &dyn AssetLedger, assets: U256) -> Result<U256, VaultError> {
        Ok(self.rate(ledger)?.preview_withdraw(assets)?)
    }

    pub fn preview_redeem(&self, ledger: &dyn AssetLedger, shares: U256) -> Result<U256, VaultError> {
        Ok(self.rate(ledger)?.preview_redeem(shares)?)
    }

    // ───────────────────────── Limits ─────────────────────────

    /// Most assets `receiver` may deposit in one call.
    pub fn max_deposit(&self, receiver: &Address) -> U256 {
        let cap = self.config.deposit_cap.unwrap_or(U256::MAX);
        cap.min(self.extension.max_deposit(receiver))
    }

    /// Most shares `receiver` may mint in one call.
    pub fn max_mint(&self, receiver: &Address) -> U256 {
        let cap = self.config.mint_cap.unwrap_or(U256::MAX);
        cap.min(self.extension.max_mint(receiver))
    }

    /// Assets `owner`'s whole share balance redeems for.
    pub fn max_withdraw(&self, ledger: &dyn AssetLedger, owner: &Address) -> Result<U256, VaultError> {
        self.convert_to_assets(ledger, self.shares.balance_of(owner))
    }

    pub fn max_redeem(&self, owner: &Address) -> U256 {
        self.shares.balance_of(owner)
    }

    // ───────────────────────── Deposit / Mint ─────────────────────────

    /// Deposit exactly `assets` from `caller` and mint the resulting shares
    /// to `receiver`. Returns the shares minted.
    ///
    /// `caller` must have approved the vault address on the asset ledger.
    pub fn deposit<L>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        assets: U256,
        receiver: Address,
    ) -> Result<U256, VaultError>
    where
        L: AssetLedger + Clone,
    {
        self.transact(ledger, "deposit", |vault, ledger| {
            let max = vault.max_deposit(&receiver);
            if assets > max {
                return Err(VaultError::LimitExceeded {
                    limit: Limit::Deposit,
                    requested: assets,
                    max,
                });
            }
            let shares = vault.rate(&*ledger)?.preview_deposit(assets)?;
            vault.settle_deposit(ledger, caller, receiver, assets, shares)?;
            Ok(shares)
        })
    }

    /// Mint exactly `shares` to `receiver`, pulling whatever assets they
    /// cost from `caller`. Returns the assets charged.
    pub fn mint<L>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        shares: U256,
        receiver: Address,
    ) -> Result<U256, VaultError>
    where
        L: AssetLedger + Clone,
    {
        self.transact(ledger, "mint", |vault, ledger| {
            let max = vault.max_mint(&receiver);
            if shares > max {
                return Err(VaultError::LimitExceeded {
                    limit: Limit::Mint,
                    requested: shares,
                    max,
                });
            }
            let assets = vault.rate(&*ledger)?.preview_mint(shares)?;
            vault.settle_deposit(ledger, caller, receiver, assets, shares)?;
            Ok(assets)
        })
    }

    // ───────────────────────── Withdraw / Redeem ─────────────────────────

    /// Send exactly `assets` to `receiver`, burning the shares they cost
    /// from `owner`. Returns the shares burned.
    ///
    /// A caller other than `owner` spends its share allowance.
    pub fn withdraw<L>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        assets: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<U256, VaultError>
    where
        L: AssetLedger + Clone,
    {
        self.transact(ledger, "withdraw", |vault, ledger| {
            let rate = vault.rate(&*ledger)?;
            let max = rate.convert_to_assets(vault.shares.balance_of(&owner))?;
            if assets > max {
                return Err(VaultError::LimitExceeded {
                    limit: Limit::Withdraw,
                    requested: assets,
                    max,
                });
            }
            let shares = rate.preview_withdraw(assets)?;
            vault.settle_withdraw(ledger, caller, receiver, owner, assets, shares)?;
            Ok(shares)
        })
    }

    /// Burn exactly `shares` from `owner` and send what they are worth to
    /// `receiver`. Returns the assets paid out.
    pub fn redeem<L>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        shares: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<U256, VaultError>
    where
        L: AssetLedger + Clone,
    {
        self.transact(ledger, "redeem", |vault, ledger| {
            let max = vault.max_redeem(&owner);
            if shares > max {
                return Err(VaultError::LimitExceeded {
                    limit: Limit::Redeem,
                    requested: shares,
                    max,
                });
            }
            let assets = vault.rate(&*ledger)?.preview_redeem(shares)?;
            vault.settle_withdraw(ledger, caller, receiver, owner, assets, shares)?;
            Ok(assets)
        })
    }

    // ───────────────────────── Share Token ─────────────────────────

    pub fn share_balance_of(&self, account: &Address) -> U256 {
        self.shares.balance_of(account)
    }

    pub fn share_allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.shares.allowance(owner, spender)
    }

    /// Let `spender` move or redeem up to `amount` of `owner`'s shares.
    /// `U256::MAX` never decreases.
    pub fn approve_shares(&mut self, owner: Address, spender: Address, amount: U256) -> ContractEvent {
        self.shares.approve(owner, spender, amount);
        self.emit(ContractEvent::Approval(Approval {
            owner,
            spender,
            amount,
        }))
    }

    pub fn transfer_shares(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<ContractEvent, VaultError> {
        self.shares
            .transfer(from, to, amount)
            .map_err(VaultError::Shares)?;
        Ok(self.emit(ContractEvent::Transfer(Transfer { from, to, amount })))
    }

    /// Move `from`'s shares on `spender`'s allowance.
    pub fn transfer_shares_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<ContractEvent, VaultError> {
        let available = self.shares.balance_of(&from);
        if available < amount {
            return Err(VaultError::Shares(LedgerError::InsufficientBalance {
                account: from,
                required: amount,
                available,
            }));
        }
        self.spend_share_allowance(from, spender, amount)?;
        self.transfer_shares(from, to, amount)
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal ─────────────────────────

    /// Pull assets, mint shares, run the deposit hook, emit `Deposit`.
    fn settle_deposit<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        receiver: Address,
        assets: U256,
        shares: U256,
    ) -> Result<(), VaultError> {
        let vault_address = self.config.address;

        ledger.transfer_from(vault_address, caller, vault_address, assets)?;
        self.mint_shares(receiver, shares)?;
        self.extension
            .after_deposit(&mut *ledger, &self.shares, vault_address, receiver, assets, shares)?;

        debug!(vault = %self.id, %caller, %receiver, %assets, %shares, "Deposit");
        self.emit(ContractEvent::Deposit(Deposit {
            caller,
            receiver,
            assets,
            shares,
        }));
        Ok(())
    }

    /// Spend allowance, run the withdraw hook, burn shares, send assets,
    /// emit `Withdraw`.
    fn settle_withdraw<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        receiver: Address,
        owner: Address,
        assets: U256,
        shares: U256,
    ) -> Result<(), VaultError> {
        let vault_address = self.config.address;

        if caller != owner {
            self.spend_share_allowance(owner, caller, shares)?;
        }
        self.extension
            .before_withdraw(&mut *ledger, &self.shares, vault_address, owner, assets, shares)?;
        self.burn_shares(owner, shares)?;
        ledger.transfer(vault_address, receiver, assets)?;

        debug!(vault = %self.id, %caller, %receiver, %owner, %assets, %shares, "Withdraw");
        self.emit(ContractEvent::Withdraw(Withdraw {
            caller,
            receiver,
            owner,
            assets,
            shares,
        }));
        Ok(())
    }

    fn mint_shares(&mut self, to: Address, amount: U256) -> Result<(), VaultError> {
        self.shares.mint(to, amount).map_err(VaultError::Shares)?;
        self.emit(ContractEvent::Transfer(Transfer {
            from: Address::ZERO,
            to,
            amount,
        }));
        Ok(())
    }

    fn burn_shares(&mut self, from: Address, amount: U256) -> Result<(), VaultError> {
        self.shares.burn(from, amount).map_err(VaultError::Shares)?;
        self.emit(ContractEvent::Transfer(Transfer {
            from,
            to: Address::ZERO,
            amount,
        }));
        Ok(())
    }

    fn spend_share_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), VaultError> {
        self.shares
            .spend_allowance(owner, spender, amount)
            .map_err(|err| match err {
                LedgerError::InsufficientAllowance {
                    owner,
                    spender,
                    required,
                    available,
                } => VaultError::AllowanceExceeded {
                    owner,
                    spender,
                    required,
                    available,
                },
                other => VaultError::Shares(other),
            })
    }

    /// Run `op` against a staged copy of `ledger` under the reentrancy
    /// guard. Commits the staged ledger on success; on failure restores
    /// shares, extension state and the event log.
    fn transact<L, T, F>(&mut self, ledger: &mut L, action: &'static str, op: F) -> Result<T, VaultError>
    where
        L: AssetLedger + Clone,
        F: FnOnce(&mut Self, &mut L) -> Result<T, VaultError>,
    {
        self.check_asset(&*ledger)?;
        if !self.reentrancy_guard.acquire() {
            return Err(VaultError::Reentrancy);
        }

        let checkpoint = Checkpoint {
            shares: self.shares.clone(),
            extension: self.extension.clone(),
            events: self.events.len(),
        };
        let mut staged = ledger.clone();

        let outcome = op(self, &mut staged);
        match &outcome {
            Ok(_) => *ledger = staged,
            Err(err) => {
                warn!(vault = %self.id, action, error = %err, "Vault action rolled back");
                self.shares = checkpoint.shares;
                self.extension = checkpoint.extension;
                self.events.truncate(checkpoint.events);
            }
        }

        self.reentrancy_guard.release();
        outcome
    }

    fn check_asset(&self, ledger: &dyn AssetLedger) -> Result<(), VaultError> {
        let actual = ledger.asset_id();
        if actual != self.config.asset {
            return Err(VaultError::AssetMismatch {
                expected: self.config.asset,
                actual,
            });
        }
        Ok(())
    }

    fn emit(&mut self, event: ContractEvent) -> ContractEvent {
        self.events.push(event.clone());
        event
    }
}
