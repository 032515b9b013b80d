//! Message delivery between the two domains.

use crate::{BridgeError, BridgeResult, L1ECOBridge, L2ECOBridge};
use alloc::vec::Vec;
use alloy_primitives::{Address, B256};
use eco_ledger::EscrowToken;
use eco_messenger::{CrossDomainMessage, CrossDomainMessenger, InMemoryMessenger, MessageError};
use eco_primitives::CallContext;
use tracing::{info, warn};

/// The result of delivering one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    /// The delivered message.
    pub message: CrossDomainMessage,
    /// The outcome of the target call. On success, carries the message hash.
    pub result: BridgeResult<B256>,
}

impl RelayOutcome {
    /// Returns `true` if the target call succeeded.
    pub const fn is_relayed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Carries queued messages from one domain's messenger to the other's bridge.
///
/// Each delivery runs as its own call on the destination domain. A rejected message leaves the
/// destination untouched and is recorded as failed, so it can be delivered again with
/// [Relayer::deliver_to_l1] or [Relayer::deliver_to_l2]. Messages drained from an outbox are
/// delivered in the order they were sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relayer {
    origin: Address,
}

impl Relayer {
    /// Creates a relayer whose delivery transactions are signed by `origin`.
    pub const fn new(origin: Address) -> Self {
        Self { origin }
    }

    /// Delivers every message queued on the settlement layer to the rollup bridge.
    pub fn relay_to_l2<T: EscrowToken>(
        &self,
        l1: &mut L1ECOBridge<InMemoryMessenger, T>,
        l2: &mut L2ECOBridge<InMemoryMessenger>,
    ) -> Vec<RelayOutcome> {
        l1.messenger_mut()
            .take_outbox()
            .into_iter()
            .map(|message| {
                let result = self.deliver_to_l2(l2, &message);
                RelayOutcome { message, result }
            })
            .collect()
    }

    /// Delivers every message queued on the rollup to the settlement-layer bridge.
    pub fn relay_to_l1<T: EscrowToken>(
        &self,
        l2: &mut L2ECOBridge<InMemoryMessenger>,
        l1: &mut L1ECOBridge<InMemoryMessenger, T>,
    ) -> Vec<RelayOutcome> {
        l2.messenger_mut()
            .take_outbox()
            .into_iter()
            .map(|message| {
                let result = self.deliver_to_l1(l1, &message);
                RelayOutcome { message, result }
            })
            .collect()
    }

    /// Delivers one message to the rollup bridge. Returns the message hash.
    pub fn deliver_to_l2(
        &self,
        l2: &mut L2ECOBridge<InMemoryMessenger>,
        message: &CrossDomainMessage,
    ) -> BridgeResult<B256> {
        if message.target != l2.address() {
            return Err(MessageError::UnknownTarget(message.target).into());
        }
        let hash = l2.messenger_mut().begin_relay(message)?;
        let ctx = CallContext::contract(l2.messenger().address(), self.origin);
        let result = l2.relay(ctx, &message.message);
        l2.messenger_mut().finish_relay(hash, result.is_ok());
        Self::report("L2", hash, result)
    }

    /// Delivers one message to the settlement-layer bridge. Returns the message hash.
    pub fn deliver_to_l1<T: EscrowToken>(
        &self,
        l1: &mut L1ECOBridge<InMemoryMessenger, T>,
        message: &CrossDomainMessage,
    ) -> BridgeResult<B256> {
        if message.target != l1.address() {
            return Err(MessageError::UnknownTarget(message.target).into());
        }
        let hash = l1.messenger_mut().begin_relay(message)?;
        let ctx = CallContext::contract(l1.messenger().address(), self.origin);
        let result = l1.relay(ctx, &message.message);
        l1.messenger_mut().finish_relay(hash, result.is_ok());
        Self::report("L1", hash, result)
    }

    fn report(domain: &str, hash: B256, result: Result<(), BridgeError>) -> BridgeResult<B256> {
        match result {
            Ok(()) => {
                info!(target: "relayer", "Relayed message {hash} to {domain}");
                Ok(hash)
            }
            Err(err) => {
                warn!(target: "relayer", "Message {hash} failed on {domain}: {err}");
                Err(err)
            }
        }
    }
}
