//! Events emitted by the ledgers.

use crate::Role;
use alloy_primitives::{Address, U256};

/// A ledger event, recorded in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LedgerEvent {
    /// A real-unit movement. Mints come from and burns go to the zero address.
    Transfer {
        /// The account debited.
        from: Address,
        /// The account credited.
        to: Address,
        /// The amount, in real units.
        value: U256,
    },
    /// The base-unit counterpart of a [LedgerEvent::Transfer] on a rebasing ledger.
    ///
    /// Observers replay these to reconstruct exact balances without knowing the multiplier
    /// history.
    BaseValueTransfer {
        /// The account debited.
        from: Address,
        /// The account credited.
        to: Address,
        /// The amount, in base units.
        value: U256,
    },
    /// An allowance was set.
    Approval {
        /// The account whose tokens may be spent.
        owner: Address,
        /// The account allowed to spend them.
        spender: Address,
        /// The allowance, in real units.
        value: U256,
    },
    /// The inflation multiplier was replaced.
    NewInflationMultiplier {
        /// The new multiplier.
        inflation_multiplier: U256,
    },
    /// An account was added to or removed from a role set.
    RoleUpdated {
        /// The role set that changed.
        role: Role,
        /// The account.
        account: Address,
        /// Whether the account now holds the role.
        allowed: bool,
    },
    /// The role admin was replaced.
    RoleAdminUpdated {
        /// The admin before the change.
        previous: Address,
        /// The admin after the change.
        current: Address,
    },
}
