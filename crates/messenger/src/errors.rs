//! Error types for the `eco-messenger` crate.

use alloc::string::{String, ToString};
use alloy_primitives::{Address, B256};
use eco_primitives::ErrorKind;
use thiserror::Error;

/// A [Result] alias for the [MessageError] type.
pub type MessageResult<T> = core::result::Result<T, MessageError>;

/// An error raised while encoding, decoding or delivering a cross-domain message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The calldata does not decode to any call the target accepts.
    #[error("Failed to decode calldata: {0}")]
    Decode(String),
    /// The message was already delivered successfully.
    #[error("Message {0} has already been relayed")]
    AlreadyRelayed(B256),
    /// The message targets a contract this endpoint does not relay to.
    #[error("No relay target at {0}")]
    UnknownTarget(Address),
}

impl MessageError {
    /// Returns the [ErrorKind] of the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode(_) => ErrorKind::InvalidAmount,
            Self::AlreadyRelayed(_) => ErrorKind::AlreadyRelayed,
            Self::UnknownTarget(_) => ErrorKind::InvalidAddress,
        }
    }
}

impl From<alloy_sol_types::Error> for MessageError {
    fn from(err: alloy_sol_types::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(MessageError::Decode("short".into()).kind(), ErrorKind::InvalidAmount);
        assert_eq!(MessageError::AlreadyRelayed(B256::ZERO).kind(), ErrorKind::AlreadyRelayed);
        assert_eq!(MessageError::UnknownTarget(Address::ZERO).kind(), ErrorKind::InvalidAddress);
    }
}
