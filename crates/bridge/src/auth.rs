//! Cross-domain sender authentication.

use crate::{BridgeError, BridgeResult};
use alloy_primitives::Address;
use eco_messenger::CrossDomainMessenger;
use eco_primitives::CallContext;

/// Fails unless the call was made by `messenger` while it relays a message sent by `peer`.
pub(crate) fn ensure_from_peer<M: CrossDomainMessenger>(
    messenger: &M,
    ctx: &CallContext,
    peer: Address,
) -> BridgeResult<()> {
    if ctx.sender != messenger.address() {
        return Err(BridgeError::InvalidMessenger(ctx.sender));
    }
    match messenger.x_domain_message_sender() {
        Some(sender) if sender == peer => Ok(()),
        Some(sender) => Err(BridgeError::InvalidCrossDomainSender(sender)),
        None => Err(BridgeError::InvalidMessenger(ctx.sender)),
    }
}
