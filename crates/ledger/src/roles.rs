//! Role sets gating privileged ledger operations.

use crate::{LedgerError, LedgerEvent, LedgerResult};
use alloy_primitives::Address;
use core::fmt;
use hashbrown::HashSet;

/// A privileged ledger operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// May create supply.
    Minter,
    /// May destroy supply held by other accounts.
    Burner,
    /// May replace the inflation multiplier.
    Rebaser,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minter => f.write_str("minter"),
            Self::Burner => f.write_str("burner"),
            Self::Rebaser => f.write_str("rebaser"),
        }
    }
}

/// The minter, burner and rebaser sets of a ledger, and the single admin allowed to edit them.
///
/// There is exactly one role admin at a time. It hands itself over in a single step, so a
/// handover to the wrong account cannot be undone; the zero address is refused outright.
#[derive(Debug, Clone, Default)]
pub struct TokenRoles {
    minters: HashSet<Address>,
    burners: HashSet<Address>,
    rebasers: HashSet<Address>,
    role_admin: Address,
}

impl TokenRoles {
    /// Creates role sets administered by `role_admin` with no members.
    pub fn new(role_admin: Address) -> Self {
        Self { role_admin, ..Default::default() }
    }

    /// Returns the current role admin.
    pub const fn role_admin(&self) -> Address {
        self.role_admin
    }

    /// Returns `true` if `account` holds `role`.
    pub fn has(&self, role: Role, account: Address) -> bool {
        self.set(role).contains(&account)
    }

    /// Adds `account` to each of `roles`, bypassing the admin check and emitting no event. Used by
    /// initializers only.
    pub(crate) fn grant(&mut self, account: Address, roles: &[Role]) {
        for &role in roles {
            self.set_mut(role).insert(account);
        }
    }

    /// Adds or removes `account` from the `role` set. Setting an existing membership again is a
    /// no-op apart from the emitted event.
    pub fn update(
        &mut self,
        caller: Address,
        role: Role,
        account: Address,
        allowed: bool,
    ) -> LedgerResult<LedgerEvent> {
        self.ensure_admin(caller)?;
        let set = self.set_mut(role);
        if allowed {
            set.insert(account);
        } else {
            set.remove(&account);
        }
        Ok(LedgerEvent::RoleUpdated { role, account, allowed })
    }

    /// Replaces the role admin. Takes effect immediately and irrevocably.
    pub fn update_role_admin(
        &mut self,
        caller: Address,
        new_admin: Address,
    ) -> LedgerResult<LedgerEvent> {
        self.ensure_admin(caller)?;
        if new_admin.is_zero() {
            return Err(LedgerError::ZeroRoleAdmin);
        }
        let previous = core::mem::replace(&mut self.role_admin, new_admin);
        Ok(LedgerEvent::RoleAdminUpdated { previous, current: new_admin })
    }

    fn ensure_admin(&self, caller: Address) -> LedgerResult<()> {
        if caller != self.role_admin {
            return Err(LedgerError::UnauthorizedRoleAdmin(caller));
        }
        Ok(())
    }

    const fn set(&self, role: Role) -> &HashSet<Address> {
        match role {
            Role::Minter => &self.minters,
            Role::Burner => &self.burners,
            Role::Rebaser => &self.rebasers,
        }
    }

    fn set_mut(&mut self, role: Role) -> &mut HashSet<Address> {
        match role {
            Role::Minter => &mut self.minters,
            Role::Burner => &mut self.burners,
            Role::Rebaser => &mut self.rebasers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const ADMIN: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    const ALICE: Address = address!("1111111111111111111111111111111111111111");

    #[test]
    fn test_update_is_idempotent() {
        let mut roles = TokenRoles::new(ADMIN);
        roles.update(ADMIN, Role::Minter, ALICE, true).unwrap();
        roles.update(ADMIN, Role::Minter, ALICE, true).unwrap();
        assert!(roles.has(Role::Minter, ALICE));
        assert!(!roles.has(Role::Burner, ALICE));

        roles.update(ADMIN, Role::Minter, ALICE, false).unwrap();
        roles.update(ADMIN, Role::Minter, ALICE, false).unwrap();
        assert!(!roles.has(Role::Minter, ALICE));
    }

    #[test]
    fn test_only_admin_edits_roles() {
        let mut roles = TokenRoles::new(ADMIN);
        for role in [Role::Minter, Role::Burner, Role::Rebaser] {
            assert_eq!(
                roles.update(ALICE, role, ALICE, true),
                Err(LedgerError::UnauthorizedRoleAdmin(ALICE))
            );
            assert!(!roles.has(role, ALICE));
        }
        assert_eq!(
            roles.update_role_admin(ALICE, ALICE),
            Err(LedgerError::UnauthorizedRoleAdmin(ALICE))
        );
    }

    #[test]
    fn test_role_admin_handover_is_immediate() {
        let mut roles = TokenRoles::new(ADMIN);
        let event = roles.update_role_admin(ADMIN, ALICE).unwrap();
        assert_eq!(event, LedgerEvent::RoleAdminUpdated { previous: ADMIN, current: ALICE });
        assert_eq!(roles.role_admin(), ALICE);
        assert_eq!(
            roles.update(ADMIN, Role::Minter, ADMIN, true),
            Err(LedgerError::UnauthorizedRoleAdmin(ADMIN))
        );
    }

    #[test]
    fn test_role_admin_refuses_zero_address() {
        let mut roles = TokenRoles::new(ADMIN);
        assert_eq!(roles.update_role_admin(ADMIN, Address::ZERO), Err(LedgerError::ZeroRoleAdmin));
        assert_eq!(roles.role_admin(), ADMIN);
    }
}
