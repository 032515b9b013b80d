//! The cross-domain message envelope.

use crate::abi::ICrossDomainMessenger;
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;

/// A message sent from one domain to a contract on the other.
///
/// The `message` field carries the ABI-encoded calldata for `target`. The envelope is created by
/// the origin-side messenger when a bridge sends, and is consumed once by the destination-side
/// messenger.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossDomainMessage {
    /// The contract the message calls on the destination domain.
    pub target: Address,
    /// The contract that sent the message on the origin domain.
    pub sender: Address,
    /// The calldata for `target`.
    pub message: Bytes,
    /// The gas the destination call may use.
    pub gas_limit: u32,
    /// The origin messenger's sequence number for the message.
    pub nonce: u64,
}

impl CrossDomainMessage {
    /// Returns the hash identifying the message on both domains.
    ///
    /// `keccak256(abi.encodeCall(relayMessage, (target, sender, message, nonce)))`. The gas limit
    /// is not part of the hash.
    pub fn hash(&self) -> B256 {
        let call = ICrossDomainMessenger::relayMessageCall {
            target: self.target,
            sender: self.sender,
            message: self.message.clone(),
            messageNonce: U256::from(self.nonce),
        };
        keccak256(call.abi_encode())
    }
}

/// The delivery status of a message on its destination domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageStatus {
    /// The target call succeeded. The message can never be delivered again.
    Relayed,
    /// The target call was rejected. The message may be retried.
    Failed,
}
