//! Traits for the `eco-messenger` crate.

use alloy_primitives::{Address, Bytes, B256};

/// One domain's endpoint of the cross-domain channel, as seen by a bridge on that domain.
///
/// Sending is fire-and-forget: the bridge never learns whether the message arrived. On the
/// receiving side, handlers compare [CrossDomainMessenger::x_domain_message_sender] against the
/// peer they expect before touching any state.
pub trait CrossDomainMessenger {
    /// Returns the address calls from the messenger arrive from.
    fn address(&self) -> Address;

    /// Queues `message` for `target` on the other domain, on behalf of `sender`. Returns the
    /// message hash.
    fn send_message(&mut self, sender: Address, target: Address, message: Bytes, gas_limit: u32)
        -> B256;

    /// Returns the origin-domain sender of the message currently being relayed, or [None]
    /// outside of a relay.
    fn x_domain_message_sender(&self) -> Option<Address>;
}
