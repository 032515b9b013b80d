//! The execution context of a single call.

use alloy_primitives::Address;

/// The caller identities and block a call executes in.
///
/// Each domain executes calls one at a time, so every state-changing operation on a ledger or a
/// bridge receives the context it runs under instead of reading ambient globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallContext {
    /// The immediate caller (`msg.sender`).
    pub sender: Address,
    /// The externally-owned account that signed the transaction (`tx.origin`).
    pub origin: Address,
    /// The number of the block the call executes in.
    pub block_number: u64,
}

impl CallContext {
    /// Creates a new [CallContext].
    pub const fn new(sender: Address, origin: Address, block_number: u64) -> Self {
        Self { sender, origin, block_number }
    }

    /// A call made directly by an externally-owned account.
    pub const fn eoa(account: Address) -> Self {
        Self::new(account, account, 0)
    }

    /// A call made by `contract` inside a transaction signed by `origin`.
    pub const fn contract(contract: Address, origin: Address) -> Self {
        Self::new(contract, origin, 0)
    }

    /// Returns the context moved to the given block.
    pub const fn at_block(mut self, block_number: u64) -> Self {
        self.block_number = block_number;
        self
    }

    /// Returns `true` if the immediate caller is the transaction signer.
    pub fn is_eoa(&self) -> bool {
        self.sender == self.origin
    }
}
