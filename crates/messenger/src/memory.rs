//! An in-memory channel endpoint.

use crate::{CrossDomainMessage, CrossDomainMessenger, MessageError, MessageResult, MessageStatus};
use alloc::vec::Vec;
use alloy_primitives::{Address, Bytes, B256};
use hashbrown::HashMap;
use tracing::{debug, trace, warn};

/// A messenger that keeps its outbox and delivery records in memory.
///
/// Outgoing messages are numbered and queued until a relayer drains them with
/// [InMemoryMessenger::take_outbox]. Incoming messages are bracketed by
/// [InMemoryMessenger::begin_relay] and [InMemoryMessenger::finish_relay]; while a relay is open
/// the messenger asserts the message's origin sender. A message that finished as
/// [MessageStatus::Relayed] is refused if it arrives again.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessenger {
    address: Address,
    nonce: u64,
    outbox: Vec<CrossDomainMessage>,
    x_domain_message_sender: Option<Address>,
    statuses: HashMap<B256, MessageStatus>,
}

impl InMemoryMessenger {
    /// Creates a messenger whose relayed calls arrive from `address`.
    pub fn new(address: Address) -> Self {
        Self { address, ..Default::default() }
    }

    /// Returns the messages sent since the outbox was last drained.
    pub fn pending(&self) -> &[CrossDomainMessage] {
        &self.outbox
    }

    /// Drains the outbox.
    pub fn take_outbox(&mut self) -> Vec<CrossDomainMessage> {
        core::mem::take(&mut self.outbox)
    }

    /// Returns the delivery status of the message with the given hash, or [None] if it never
    /// arrived.
    pub fn message_status(&self, hash: B256) -> Option<MessageStatus> {
        self.statuses.get(&hash).copied()
    }

    /// Opens the relay of an incoming message and asserts its sender. Returns the message hash.
    pub fn begin_relay(&mut self, message: &CrossDomainMessage) -> MessageResult<B256> {
        let hash = message.hash();
        if self.message_status(hash) == Some(MessageStatus::Relayed) {
            warn!(target: "messenger", "Refusing to relay message {hash} twice");
            return Err(MessageError::AlreadyRelayed(hash));
        }
        trace!(target: "messenger", "Relaying message {hash} from {} to {}", message.sender, message.target);
        self.x_domain_message_sender = Some(message.sender);
        Ok(hash)
    }

    /// Closes the open relay and records its outcome.
    pub fn finish_relay(&mut self, hash: B256, success: bool) {
        self.x_domain_message_sender = None;
        let status = if success { MessageStatus::Relayed } else { MessageStatus::Failed };
        debug!(target: "messenger", "Message {hash} {status:?}");
        self.statuses.insert(hash, status);
    }

    /// Overrides the asserted sender. Lets a caller stage what a compromised or misconfigured
    /// channel would report.
    pub fn set_x_domain_message_sender(&mut self, sender: Option<Address>) {
        self.x_domain_message_sender = sender;
    }
}

impl CrossDomainMessenger for InMemoryMessenger {
    fn address(&self) -> Address {
        self.address
    }

    fn send_message(
        &mut self,
        sender: Address,
        target: Address,
        message: Bytes,
        gas_limit: u32,
    ) -> B256 {
        let message = CrossDomainMessage { target, sender, message, gas_limit, nonce: self.nonce };
        let hash = message.hash();
        self.nonce += 1;
        debug!(target: "messenger", "Queued message {hash} (nonce {}) for {target}", message.nonce);
        self.outbox.push(message);
        hash
    }

    fn x_domain_message_sender(&self) -> Option<Address> {
        self.x_domain_message_sender
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const MESSENGER: Address = address!("4200000000000000000000000000000000000007");
    const L1_BRIDGE: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    const L2_BRIDGE: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

    #[test]
    fn test_send_numbers_and_queues() {
        let mut messenger = InMemoryMessenger::new(MESSENGER);
        let first = messenger.send_message(L1_BRIDGE, L2_BRIDGE, Bytes::from_static(&[1]), 100);
        let second = messenger.send_message(L1_BRIDGE, L2_BRIDGE, Bytes::from_static(&[1]), 100);
        assert_ne!(first, second);

        let outbox = messenger.take_outbox();
        assert_eq!(outbox.len(), 2);
        assert_eq!(outbox[0].nonce, 0);
        assert_eq!(outbox[1].nonce, 1);
        assert_eq!(outbox[1].hash(), second);
        assert!(messenger.pending().is_empty());
    }

    #[test]
    fn test_relay_asserts_sender_only_while_open() {
        let mut origin = InMemoryMessenger::new(MESSENGER);
        origin.send_message(L1_BRIDGE, L2_BRIDGE, Bytes::new(), 0);
        let message = origin.take_outbox().remove(0);

        let mut destination = InMemoryMessenger::new(MESSENGER);
        assert_eq!(destination.x_domain_message_sender(), None);
        let hash = destination.begin_relay(&message).unwrap();
        assert_eq!(destination.x_domain_message_sender(), Some(L1_BRIDGE));
        destination.finish_relay(hash, true);
        assert_eq!(destination.x_domain_message_sender(), None);
    }

    #[test]
    fn test_relayed_message_is_never_replayed() {
        let mut origin = InMemoryMessenger::new(MESSENGER);
        let hash = origin.send_message(L1_BRIDGE, L2_BRIDGE, Bytes::new(), 0);
        let message = origin.take_outbox().remove(0);

        let mut destination = InMemoryMessenger::new(MESSENGER);
        assert_eq!(destination.message_status(hash), None);

        destination.begin_relay(&message).unwrap();
        destination.finish_relay(hash, false);
        assert_eq!(destination.message_status(hash), Some(MessageStatus::Failed));

        destination.begin_relay(&message).unwrap();
        destination.finish_relay(hash, true);
        assert_eq!(destination.message_status(hash), Some(MessageStatus::Relayed));

        assert_eq!(destination.begin_relay(&message), Err(MessageError::AlreadyRelayed(hash)));
        assert_eq!(destination.x_domain_message_sender(), None);
    }
}
