//! Errors for the `eco-ledger` crate.

use alloy_primitives::{Address, U256};
use eco_primitives::{ErrorKind, UnitsError};
use thiserror::Error;

/// A [Result] type alias where the error is [LedgerError].
pub type LedgerResult<T> = Result<T, LedgerError>;

/// An error type for ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The one-time initializer already ran.
    #[error("Contract has already been initialized.")]
    AlreadyInitialized,
    /// The caller is not in the minter set.
    #[error("{0} is not authorized to mint")]
    UnauthorizedMinter(Address),
    /// The caller is neither in the burner set nor burning its own balance.
    #[error("{0} is not authorized to burn")]
    UnauthorizedBurner(Address),
    /// The caller is not in the rebaser set.
    #[error("{0} is not authorized to rebase")]
    UnauthorizedRebaser(Address),
    /// The caller is not the role admin.
    #[error("{0} is not authorized to edit roles")]
    UnauthorizedRoleAdmin(Address),
    /// The role admin cannot be handed to the zero address.
    #[error("Role admin cannot be the zero address")]
    ZeroRoleAdmin,
    /// Tokens cannot be minted or transferred to the zero address.
    #[error("Transfer to the zero address")]
    ZeroAddress,
    /// The account does not hold enough base units.
    #[error("Insufficient balance: {available} < {required} base units")]
    InsufficientBalance {
        /// The base balance of the account.
        available: U256,
        /// The base units the operation needs.
        required: U256,
    },
    /// The spender's allowance does not cover the amount.
    #[error("Insufficient allowance: {available} < {required}")]
    InsufficientAllowance {
        /// The remaining allowance, in real units.
        available: U256,
        /// The requested amount, in real units.
        required: U256,
    },
    /// A base/real conversion failed.
    #[error(transparent)]
    Units(#[from] UnitsError),
}

impl LedgerError {
    /// Returns the [ErrorKind] of the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyInitialized => ErrorKind::AlreadyInitialized,
            Self::UnauthorizedMinter(_) |
            Self::UnauthorizedBurner(_) |
            Self::UnauthorizedRebaser(_) |
            Self::UnauthorizedRoleAdmin(_) => ErrorKind::UnauthorizedRole,
            Self::ZeroRoleAdmin | Self::ZeroAddress => ErrorKind::InvalidAddress,
            Self::InsufficientBalance { .. } |
            Self::InsufficientAllowance { .. } |
            Self::Units(_) => ErrorKind::InvalidAmount,
        }
    }
}
