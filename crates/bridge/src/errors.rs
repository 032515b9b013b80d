//! Error types for the `eco-bridge` crate.

use alloc::string::String;
use alloy_primitives::{Address, U256};
use eco_ledger::LedgerError;
use eco_messenger::MessageError;
use eco_primitives::{ErrorKind, UnitsError};
use thiserror::Error;

/// A [Result] alias for the [BridgeError] type.
pub type BridgeResult<T> = core::result::Result<T, BridgeError>;

/// A [Result] alias for the [ProxyError] type.
pub type ProxyResult<T> = core::result::Result<T, ProxyError>;

/// An error type for [ProxyAdmin] operations.
///
/// [ProxyAdmin]: crate::ProxyAdmin
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyError {
    /// The caller does not own the proxy admin.
    #[error("Ownable: caller is not the owner")]
    NotOwner(Address),
    /// Ownership cannot be handed to the zero address.
    #[error("Ownable: new owner is the zero address")]
    ZeroAddress,
    /// No proxy is registered at the address.
    #[error("Unknown proxy {0}")]
    UnknownProxy(Address),
}

impl ProxyError {
    /// Returns the [ErrorKind] of the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner(_) => ErrorKind::NotOwner,
            Self::ZeroAddress | Self::UnknownProxy(_) => ErrorKind::InvalidAddress,
        }
    }
}

/// An error type for the bridges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The bridge was used before its one-time initializer ran.
    #[error("Bridge has not been initialized")]
    NotInitialized,
    /// The one-time initializer already ran.
    #[error("Contract has already been initialized.")]
    AlreadyInitialized,
    /// A channel-gated handler was not called by the messenger, or no relay was in progress.
    #[error("OVM_XCHAIN: messenger contract unauthenticated")]
    InvalidMessenger(Address),
    /// The messenger asserted a sender other than the peer bridge.
    #[error("OVM_XCHAIN: wrong sender of cross-domain message")]
    InvalidCrossDomainSender(Address),
    /// A deposit was initiated by a contract rather than an externally-owned account.
    #[error("Account not EOA: {0}")]
    ContractCallerRejected(Address),
    /// The settlement-layer token does not match the configured one.
    #[error("Invalid L1 token address {0}")]
    InvalidL1Address(Address),
    /// The rollup token does not match the configured one.
    #[error("Invalid L2 token address {0}")]
    InvalidL2Address(Address),
    /// A rebase carried a zero multiplier.
    #[error("Invalid inflation multiplier")]
    InvalidInflationMultiplier,
    /// An upgrade message is not newer than the last applied upgrade of the same proxy.
    #[error("Upgrade block number {received} must be greater than last upgrade block {last}")]
    InvalidUpgradeBlock {
        /// The block number of the last applied upgrade.
        last: U256,
        /// The block number the rejected message carried.
        received: U256,
    },
    /// The caller is not the configured upgrader.
    #[error("Caller {0} not authorized to upgrade L2 contracts.")]
    UnauthorizedUpgrader(Address),
    /// The bridge does not own the proxy admin it upgrades through.
    #[error("Bridge is not the owner of the proxy admin (owner is {0})")]
    NotOwner(Address),
    /// The escrow token transfer reverted or returned `false`.
    #[error("Token transfer failed: {0}")]
    TransferFailed(String),
    /// A ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// A proxy admin operation failed.
    #[error(transparent)]
    Proxy(#[from] ProxyError),
    /// A base/real conversion failed.
    #[error(transparent)]
    Units(#[from] UnitsError),
    /// A message could not be decoded or delivered.
    #[error(transparent)]
    Message(#[from] MessageError),
}

impl BridgeError {
    /// Returns the [ErrorKind] of the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInitialized => ErrorKind::Uninitialized,
            Self::AlreadyInitialized => ErrorKind::AlreadyInitialized,
            Self::InvalidMessenger(_) => ErrorKind::Unauthenticated,
            Self::InvalidCrossDomainSender(_) => ErrorKind::UnauthorizedSender,
            Self::ContractCallerRejected(_) | Self::UnauthorizedUpgrader(_) => {
                ErrorKind::UnauthorizedRole
            }
            Self::InvalidL1Address(_) | Self::InvalidL2Address(_) => ErrorKind::InvalidToken,
            Self::InvalidInflationMultiplier | Self::InvalidUpgradeBlock { .. } => {
                ErrorKind::InvalidAmount
            }
            Self::NotOwner(_) => ErrorKind::NotOwner,
            Self::TransferFailed(_) => ErrorKind::TransferFailed,
            Self::Ledger(err) => err.kind(),
            Self::Proxy(err) => err.kind(),
            Self::Units(err) => err.kind(),
            Self::Message(err) => err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_follow_wrapped_errors() {
        let err = BridgeError::from(LedgerError::UnauthorizedBurner(Address::ZERO));
        assert_eq!(err.kind(), ErrorKind::UnauthorizedRole);
        let err = BridgeError::from(ProxyError::NotOwner(Address::ZERO));
        assert_eq!(err.kind(), ErrorKind::NotOwner);
        assert_eq!(BridgeError::NotInitialized.kind(), ErrorKind::Uninitialized);
    }
}
