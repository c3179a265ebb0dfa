//! Pause-gated vault composition
//!
//! Wires a [`PauseGate`] and [`AccessControl`] in front of a [`Vault`]:
//! - deposit / mint are gated on [`DEPOSIT_KEY`]
//! - withdraw / redeem are gated on [`WITHDRAW_KEY`]
//! - a global pause gates all four
//! - only admins and pausers may toggle flags
//!
//! Events from the vault and the gate are merged into one ordered log.

use alloy_primitives::{Address, U256};
use tracing::warn;
use vault_types::ids::PauseKey;

use crate::config::VaultConfig;
use crate::errors::{ConfigError, GuardError};
use crate::events::ContractEvent;
use crate::extension::{Passive, VaultExtension};
use crate::ledger::AssetLedger;
use crate::security::{AccessControl, PauseGate, Role};
use crate::vault::Vault;

/// Pause key covering deposit and mint.
pub const DEPOSIT_KEY: &str = "vault.deposit";

/// Pause key covering withdraw and redeem.
pub const WITHDRAW_KEY: &str = "vault.withdraw";

#[derive(Debug)]
pub struct GuardedVault<X = Passive> {
    vault: Vault<X>,
    gate: PauseGate,
    access_control: AccessControl,
    events: Vec<ContractEvent>,
}

impl GuardedVault<Passive> {
    pub fn new(config: VaultConfig, admin: Address) -> Result<Self, ConfigError> {
        Self::with_extension(config, Passive, admin)
    }
}

impl<X: VaultExtension + Clone> GuardedVault<X> {
    pub fn with_extension(config: VaultConfig, extension: X, admin: Address) -> Result<Self, ConfigError> {
        Ok(Self {
            vault: Vault::with_extension(config, extension)?,
            gate: PauseGate::new(),
            access_control: AccessControl::new(admin),
            events: Vec::new(),
        })
    }

    /// Read-only access to the underlying vault (conversions, limits, balances).
    pub fn vault(&self) -> &Vault<X> {
        &self.vault
    }

    pub fn gate(&self) -> &PauseGate {
        &self.gate
    }

    pub fn access_control(&self) -> &AccessControl {
        &self.access_control
    }

    // ───────────────────────── Gated Vault Actions ─────────────────────────

    pub fn deposit<L>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        assets: U256,
        receiver: Address,
    ) -> Result<U256, GuardError>
    where
        L: AssetLedger + Clone,
    {
        self.check_open(DEPOSIT_KEY)?;
        let shares = self.vault.deposit(ledger, caller, assets, receiver)?;
        self.collect_events();
        Ok(shares)
    }

    pub fn mint<L>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        shares: U256,
        receiver: Address,
    ) -> Result<U256, GuardError>
    where
        L: AssetLedger + Clone,
    {
        self.check_open(DEPOSIT_KEY)?;
        let assets = self.vault.mint(ledger, caller, shares, receiver)?;
        self.collect_events();
        Ok(assets)
    }

    pub fn withdraw<L>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        assets: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<U256, GuardError>
    where
        L: AssetLedger + Clone,
    {
        self.check_open(WITHDRAW_KEY)?;
        let shares = self.vault.withdraw(ledger, caller, assets, receiver, owner)?;
        self.collect_events();
        Ok(shares)
    }

    pub fn redeem<L>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        shares: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<U256, GuardError>
    where
        L: AssetLedger + Clone,
    {
        self.check_open(WITHDRAW_KEY)?;
        let assets = self.vault.redeem(ledger, caller, shares, receiver, owner)?;
        self.collect_events();
        Ok(assets)
    }

    /// Share approvals are not gated.
    pub fn approve_shares(&mut self, owner: Address, spender: Address, amount: U256) {
        self.vault.approve_shares(owner, spender, amount);
        self.collect_events();
    }

    /// Share transfers are not gated.
    pub fn transfer_shares(&mut self, from: Address, to: Address, amount: U256) -> Result<(), GuardError> {
        self.vault.transfer_shares(from, to, amount)?;
        self.collect_events();
        Ok(())
    }

    /// Spend `spender`'s share allowance over `from`. Not gated.
    pub fn transfer_shares_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), GuardError> {
        self.vault.transfer_shares_from(spender, from, to, amount)?;
        self.collect_events();
        Ok(())
    }

    // ───────────────────────── Pause ─────────────────────────

    pub fn pause(&mut self, caller: Address) -> Result<(), GuardError> {
        self.check_pauser(&caller)?;
        self.gate.pause(caller)?;
        self.collect_events();
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address) -> Result<(), GuardError> {
        self.check_pauser(&caller)?;
        self.gate.unpause(caller)?;
        self.collect_events();
        Ok(())
    }

    pub fn partially_pause(&mut self, caller: Address, key: impl Into<PauseKey>) -> Result<(), GuardError> {
        self.check_pauser(&caller)?;
        self.gate.partially_pause(caller, key.into())?;
        self.collect_events();
        Ok(())
    }

    pub fn partially_unpause(&mut self, caller: Address, key: impl Into<PauseKey>) -> Result<(), GuardError> {
        self.check_pauser(&caller)?;
        self.gate.partially_unpause(caller, key.into())?;
        self.collect_events();
        Ok(())
    }

    // ───────────────────────── Access Control ─────────────────────────

    pub fn grant_role(&mut self, caller: Address, target: Address, role: Role) -> Result<(), GuardError> {
        self.access_control.grant_role(&caller, target, role)?;
        Ok(())
    }

    pub fn revoke_role(&mut self, caller: Address, target: Address) -> Result<(), GuardError> {
        self.access_control.revoke_role(&caller, &target)?;
        Ok(())
    }

    /// Hand the primary admin seat to `new_admin`.
    pub fn transfer_admin(&mut self, caller: Address, new_admin: Address) -> Result<(), GuardError> {
        self.access_control.transfer_admin(&caller, new_admin)?;
        Ok(())
    }

    // ───────────────────────── Events ─────────────────────────

    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Guards ─────────────────────────

    fn check_open(&self, key: &str) -> Result<(), GuardError> {
        let key = PauseKey::from(key);
        if let Err(err) = self.gate.require_not_paused(Some(&key)) {
            warn!(vault = %self.vault.id(), %key, "Rejected: paused");
            return Err(err.into());
        }
        Ok(())
    }

    fn check_pauser(&self, caller: &Address) -> Result<(), GuardError> {
        if !self.access_control.can_pause(caller) {
            warn!(%caller, "Rejected: not a pauser");
            return Err(GuardError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    fn collect_events(&mut self) {
        // Each action touches one component, so draining both keeps order
        self.events.extend(self.vault.drain_events());
        self.events.extend(self.gate.drain_events());
    }
}
