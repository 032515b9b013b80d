//! The error taxonomy shared by every bridge component.

use core::fmt;

/// The category an error falls into.
///
/// Every error is fatal to the call that raised it and leaves no partial state behind; the kind
/// tells a relayer or client *why* the call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// The call did not arrive through the expected cross-domain channel.
    Unauthenticated,
    /// The channel-asserted sender is not the configured peer.
    UnauthorizedSender,
    /// A minter, burner, rebaser, role-admin, upgrader or EOA check failed.
    UnauthorizedRole,
    /// The token address is not part of the configured pair.
    InvalidToken,
    /// Zero multiplier, stale upgrade, insufficient balance or allowance, or undecodable calldata.
    InvalidAmount,
    /// The underlying token transfer reverted or returned `false`.
    TransferFailed,
    /// The component was already initialized.
    AlreadyInitialized,
    /// The proxy-admin ownership precondition is unmet.
    NotOwner,
    /// A zero address was supplied where it would lock out an authority.
    InvalidAddress,
    /// The component has not been initialized yet.
    Uninitialized,
    /// The cross-domain message was already delivered successfully.
    AlreadyRelayed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::UnauthorizedSender => "unauthorized sender",
            Self::UnauthorizedRole => "unauthorized role",
            Self::InvalidToken => "invalid token",
            Self::InvalidAmount => "invalid amount",
            Self::TransferFailed => "transfer failed",
            Self::AlreadyInitialized => "already initialized",
            Self::NotOwner => "not owner",
            Self::InvalidAddress => "invalid address",
            Self::Uninitialized => "uninitialized",
            Self::AlreadyRelayed => "already relayed",
        };
        f.write_str(name)
    }
}
