//! Shared security primitives for contract modules
//!
//! Provides the reentrancy guard around vault entry points, role-based
//! access control, and the global / keyed pause gate.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use alloy_primitives::Address;
use tracing::info;
use vault_types::ids::PauseKey;

use crate::errors::{AccessError, PauseError, PauseScope};
use crate::events::{ContractEvent, Paused, PausedWithKey, Unpaused, UnpausedWithKey};

/// Reentrancy guard preventing nested calls into protected functions.
///
/// A contract function acquires the guard before executing state-changing
/// logic and releases it on completion. Any nested call attempt fails.
///
/// Defence in depth: entry points take `&mut self`, so the borrow checker
/// already rules out a hook or ledger calling back into the same vault.
#[derive(Debug, Clone)]
pub struct ReentrancyGuard {
    locked: bool,
}

impl ReentrancyGuard {
    /// Create a new unlocked guard.
    pub fn new() -> Self {
        Self { locked: false }
    }

    /// Acquire the guard. Returns `true` if successfully acquired.
    /// Returns `false` if already locked (reentrancy attempt).
    pub fn acquire(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// Release the guard.
    pub fn release(&mut self) {
        self.locked = false;
    }

    /// Check if currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Default for ReentrancyGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Access control roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full control, including role management
    Admin,
    /// May toggle global and keyed pause flags
    Pauser,
}

/// Role-based access control manager.
///
/// Maps accounts to their assigned role. The primary admin can neither be
/// revoked nor demoted except through `transfer_admin`.
#[derive(Debug, Clone)]
pub struct AccessControl {
    roles: HashMap<Address, Role>,
    admin: Address,
}

impl AccessControl {
    /// Create access control with an initial admin.
    pub fn new(admin: Address) -> Self {
        let mut roles = HashMap::new();
        roles.insert(admin, Role::Admin);
        Self { roles, admin }
    }

    /// Check if an account has the specified role.
    pub fn has_role(&self, account: &Address, role: Role) -> bool {
        self.roles.get(account).map_or(false, |r| *r == role)
    }

    pub fn is_admin(&self, account: &Address) -> bool {
        self.has_role(account, Role::Admin)
    }

    /// Admins and pausers may pause.
    pub fn can_pause(&self, account: &Address) -> bool {
        self.roles.contains_key(account)
    }

    /// Assign a role to an account. Only admin can assign roles.
    pub fn grant_role(&mut self, caller: &Address, target: Address, role: Role) -> Result<(), AccessError> {
        self.require_admin(caller)?;
        self.require_unprotected(&target)?;
        self.roles.insert(target, role);
        info!(%caller, %target, ?role, "Role granted");
        Ok(())
    }

    /// Remove an account's role. Only admin can revoke.
    pub fn revoke_role(&mut self, caller: &Address, target: &Address) -> Result<(), AccessError> {
        self.require_admin(caller)?;
        self.require_unprotected(target)?;
        self.roles.remove(target);
        info!(%caller, %target, "Role revoked");
        Ok(())
    }

    /// Transfer the primary admin seat to a new account.
    pub fn transfer_admin(&mut self, current_admin: &Address, new_admin: Address) -> Result<(), AccessError> {
        if *current_admin != self.admin {
            return Err(AccessError::NotAdmin {
                caller: *current_admin,
            });
        }
        self.roles.remove(current_admin);
        self.roles.insert(new_admin, Role::Admin);
        self.admin = new_admin;
        info!(from = %current_admin, to = %new_admin, "Admin transferred");
        Ok(())
    }

    fn require_admin(&self, caller: &Address) -> Result<(), AccessError> {
        if !self.is_admin(caller) {
            return Err(AccessError::NotAdmin { caller: *caller });
        }
        Ok(())
    }

    fn require_unprotected(&self, target: &Address) -> Result<(), AccessError> {
        if *target == self.admin {
            return Err(AccessError::ProtectedAdmin { target: *target });
        }
        Ok(())
    }

    /// Get the current primary admin.
    pub fn admin(&self) -> &Address {
        &self.admin
    }
}

/// Global kill-switch plus independent keyed pause flags.
///
/// A key reads as paused when either the global flag or its own flag is
/// set. Each flag cycles Unpaused -> Paused -> Unpaused; a transition
/// requested from the wrong state fails and changes nothing. Every
/// successful transition emits exactly one event naming the caller.
#[derive(Debug, Clone, Default)]
pub struct PauseGate {
    paused: bool,
    partially_paused: HashSet<PauseKey>,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl PauseGate {
    /// Create a gate with every flag cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective pause state: `None` asks about the global flag only.
    pub fn is_paused(&self, key: Option<&PauseKey>) -> bool {
        self.paused || key.map_or(false, |k| self.partially_paused.contains(k))
    }

    /// Whether `key`'s own flag is set, ignoring the global flag.
    pub fn is_partially_paused(&self, key: &PauseKey) -> bool {
        self.partially_paused.contains(key)
    }

    /// Fail with `AlreadyPaused` if the scope is effectively paused.
    pub fn require_not_paused(&self, key: Option<&PauseKey>) -> Result<(), PauseError> {
        if self.is_paused(key) {
            return Err(PauseError::AlreadyPaused {
                scope: PauseScope::of(key),
            });
        }
        Ok(())
    }

    /// Fail with `NotPaused` unless the scope is effectively paused.
    pub fn require_paused(&self, key: Option<&PauseKey>) -> Result<(), PauseError> {
        if !self.is_paused(key) {
            return Err(PauseError::NotPaused {
                scope: PauseScope::of(key),
            });
        }
        Ok(())
    }

    pub fn pause(&mut self, caller: Address) -> Result<ContractEvent, PauseError> {
        self.require_not_paused(None)?;
        self.paused = true;
        info!(account = %caller, "Paused");
        Ok(self.emit(ContractEvent::Paused(Paused { account: caller })))
    }

    pub fn unpause(&mut self, caller: Address) -> Result<ContractEvent, PauseError> {
        self.require_paused(None)?;
        self.paused = false;
        info!(account = %caller, "Unpaused");
        Ok(self.emit(ContractEvent::Unpaused(Unpaused { account: caller })))
    }

    /// Set `key`'s own flag. Fails if that flag is already set.
    pub fn partially_pause(
        &mut self,
        caller: Address,
        key: PauseKey,
    ) -> Result<ContractEvent, PauseError> {
        if !self.partially_paused.insert(key.clone()) {
            return Err(PauseError::AlreadyPaused {
                scope: PauseScope::Key(key),
            });
        }
        info!(account = %caller, %key, "Partially paused");
        Ok(self.emit(ContractEvent::PausedWithKey(PausedWithKey {
            account: caller,
            key,
        })))
    }

    /// Clear `key`'s own flag. Fails if that flag is not set.
    pub fn partially_unpause(
        &mut self,
        caller: Address,
        key: PauseKey,
    ) -> Result<ContractEvent, PauseError> {
        if !self.partially_paused.remove(&key) {
            return Err(PauseError::NotPaused {
                scope: PauseScope::Key(key),
            });
        }
        info!(account = %caller, %key, "Partially unpaused");
        Ok(self.emit(ContractEvent::UnpausedWithKey(UnpausedWithKey {
            account: caller,
            key,
        })))
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: ContractEvent) -> ContractEvent {
        self.events.push(event.clone());
        event
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

    fn carol() -> Address {
        Address::repeat_byte(0xc4)
    }

    // --- ReentrancyGuard tests ---

    #[test]
    fn test_reentrancy_guard_acquire_release() {
        let mut guard = ReentrancyGuard::new();
        assert!(!guard.is_locked());
        assert!(guard.acquire());
        assert!(guard.is_locked());
        guard.release();
        assert!(!guard.is_locked());
    }

    #[test]
    fn test_reentrancy_guard_double_acquire_fails() {
        let mut guard = ReentrancyGuard::new();
        assert!(guard.acquire());
        assert!(!guard.acquire(), "Second acquire must fail");
    }

    // --- AccessControl tests ---

    #[test]
    fn test_access_control_admin() {
        let ac = AccessControl::new(alice());
        assert!(ac.is_admin(&alice()));
        assert!(!ac.is_admin(&bob()));
        assert!(ac.can_pause(&alice()));
    }

    #[test]
    fn test_access_control_grant_pauser() {
        let mut ac = AccessControl::new(alice());
        assert!(ac.grant_role(&alice(), bob(), Role::Pauser).is_ok());
        assert!(ac.has_role(&bob(), Role::Pauser));
        assert!(ac.can_pause(&bob()));
        assert!(!ac.is_admin(&bob()));
    }

    #[test]
    fn test_access_control_non_admin_cannot_grant() {
        let mut ac = AccessControl::new(alice());
        ac.grant_role(&alice(), bob(), Role::Pauser).unwrap();
        assert_eq!(
            ac.grant_role(&bob(), carol(), Role::Pauser),
            Err(AccessError::NotAdmin { caller: bob() })
        );
        assert!(!ac.can_pause(&carol()));
    }

    #[test]
    fn test_access_control_cannot_demote_primary_admin() {
        let mut ac = AccessControl::new(alice());
        assert_eq!(
            ac.grant_role(&alice(), alice(), Role::Pauser),
            Err(AccessError::ProtectedAdmin { target: alice() })
        );
        assert_eq!(
            ac.revoke_role(&alice(), &alice()),
            Err(AccessError::ProtectedAdmin { target: alice() })
        );
        assert!(ac.is_admin(&alice()));
    }

    #[test]
    fn test_access_control_revoke_role() {
        let mut ac = AccessControl::new(alice());
        ac.grant_role(&alice(), bob(), Role::Pauser).unwrap();
        assert!(ac.revoke_role(&alice(), &bob()).is_ok());
        assert!(!ac.can_pause(&bob()));
    }

    #[test]
    fn test_access_control_transfer_admin() {
        let mut ac = AccessControl::new(alice());
        assert!(ac.transfer_admin(&alice(), bob()).is_ok());
        assert!(ac.is_admin(&bob()));
        assert!(!ac.is_admin(&alice()));
        assert_eq!(ac.admin(), &bob());
    }

    #[test]
    fn test_access_control_transfer_admin_by_non_admin() {
        let mut ac = AccessControl::new(alice());
        assert_eq!(
            ac.transfer_admin(&bob(), carol()),
            Err(AccessError::NotAdmin { caller: bob() })
        );
        assert_eq!(ac.admin(), &alice());
    }

    // --- PauseGate tests ---

    #[test]
    fn test_pause_gate_starts_unpaused() {
        let gate = PauseGate::new();
        let key = PauseKey::from("k");
        assert!(!gate.is_paused(None));
        assert!(!gate.is_paused(Some(&key)));
        assert!(gate.require_not_paused(Some(&key)).is_ok());
    }

    #[test]
    fn test_pause_twice_fails() {
        let mut gate = PauseGate::new();
        gate.pause(alice()).unwrap();
        assert_eq!(
            gate.pause(alice()),
            Err(PauseError::AlreadyPaused {
                scope: PauseScope::Global
            })
        );
        assert_eq!(gate.events().len(), 1);
    }

    #[test]
    fn test_unpause_before_pause_fails() {
        let mut gate = PauseGate::new();
        assert_eq!(
            gate.unpause(alice()),
            Err(PauseError::NotPaused {
                scope: PauseScope::Global
            })
        );
        assert!(gate.events().is_empty());
    }

    #[test]
    fn test_pause_unpause_cycle_events() {
        let mut gate = PauseGate::new();
        gate.pause(alice()).unwrap();
        gate.unpause(bob()).unwrap();
        assert_eq!(
            gate.drain_events(),
            vec![
                ContractEvent::Paused(Paused { account: alice() }),
                ContractEvent::Unpaused(Unpaused { account: bob() }),
            ]
        );
        assert!(!gate.is_paused(None));
    }

    #[test]
    fn test_global_pause_covers_every_key() {
        let mut gate = PauseGate::new();
        gate.pause(alice()).unwrap();
        for key in ["a", "b", "vault.deposit"] {
            let key = PauseKey::from(key);
            assert!(gate.is_paused(Some(&key)));
            assert!(!gate.is_partially_paused(&key));
            assert!(gate.require_not_paused(Some(&key)).is_err());
        }
    }

    #[test]
    fn test_partial_pause_is_scoped() {
        let mut gate = PauseGate::new();
        let k1 = PauseKey::from("k1");
        let k2 = PauseKey::from("k2");
        gate.partially_pause(alice(), k1.clone()).unwrap();

        assert!(gate.is_paused(Some(&k1)));
        assert!(!gate.is_paused(Some(&k2)));
        assert!(!gate.is_paused(None));
        assert!(gate.require_not_paused(Some(&k2)).is_ok());
        assert_eq!(
            gate.require_not_paused(Some(&k1)),
            Err(PauseError::AlreadyPaused {
                scope: PauseScope::Key(k1)
            })
        );
    }

    #[test]
    fn test_partial_pause_twice_fails() {
        let mut gate = PauseGate::new();
        let key = PauseKey::from("k");
        gate.partially_pause(alice(), key.clone()).unwrap();
        assert!(matches!(
            gate.partially_pause(alice(), key),
            Err(PauseError::AlreadyPaused { .. })
        ));
    }

    #[test]
    fn test_partial_unpause_unset_key_fails() {
        let mut gate = PauseGate::new();
        let key = PauseKey::from("k");
        assert_eq!(
            gate.partially_unpause(alice(), key.clone()),
            Err(PauseError::NotPaused {
                scope: PauseScope::Key(key)
            })
        );
    }

    #[test]
    fn test_partial_cycle_independent_of_global() {
        let mut gate = PauseGate::new();
        let key = PauseKey::from("k");
        gate.pause(alice()).unwrap();
        gate.partially_pause(alice(), key.clone()).unwrap();
        gate.unpause(alice()).unwrap();

        // Key flag survives the global cycle
        assert!(gate.is_paused(Some(&key)));

        gate.partially_unpause(bob(), key.clone()).unwrap();
        assert!(!gate.is_paused(Some(&key)));
        assert_eq!(
            gate.events().last(),
            Some(&ContractEvent::UnpausedWithKey(UnpausedWithKey {
                account: bob(),
                key,
            }))
        );
    }

    #[test]
    fn test_require_paused() {
        let mut gate = PauseGate::new();
        let key = PauseKey::from("k");
        assert!(gate.require_paused(Some(&key)).is_err());
        gate.pause(alice()).unwrap();
        assert!(gate.require_paused(Some(&key)).is_ok());
        assert!(gate.require_paused(None).is_ok());
    }
}
