//! Events emitted by the bridges.

use alloy_primitives::{Address, Bytes, U256};

/// A bridge event, recorded in emission order.
///
/// Amounts are in real units at the multiplier of the domain that emitted the event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BridgeEvent {
    /// Tokens were escrowed on the settlement layer and a deposit message was sent.
    ERC20DepositInitiated {
        /// The settlement-layer token.
        l1_token: Address,
        /// The rollup token.
        l2_token: Address,
        /// The depositor.
        from: Address,
        /// The rollup recipient.
        to: Address,
        /// The escrowed amount.
        amount: U256,
        /// Opaque data forwarded to the rollup.
        data: Bytes,
    },
    /// Escrow was released for a withdrawal.
    ERC20WithdrawalFinalized {
        /// The settlement-layer token.
        l1_token: Address,
        /// The rollup token.
        l2_token: Address,
        /// The rollup account that withdrew.
        from: Address,
        /// The settlement-layer recipient.
        to: Address,
        /// The released amount.
        amount: U256,
        /// Opaque data forwarded from the rollup.
        data: Bytes,
    },
    /// Tokens were burned on the rollup and a withdrawal message was sent.
    WithdrawalInitiated {
        /// The settlement-layer token.
        l1_token: Address,
        /// The rollup token.
        l2_token: Address,
        /// The rollup account that withdrew.
        from: Address,
        /// The settlement-layer recipient.
        to: Address,
        /// The burned amount.
        amount: U256,
        /// Opaque data forwarded to the settlement layer.
        data: Bytes,
    },
    /// A deposit was minted on the rollup.
    DepositFinalized {
        /// The settlement-layer token.
        l1_token: Address,
        /// The rollup token.
        l2_token: Address,
        /// The depositor.
        from: Address,
        /// The rollup recipient.
        to: Address,
        /// The minted amount.
        amount: U256,
        /// Opaque data forwarded from the settlement layer.
        data: Bytes,
    },
    /// The rollup ledger took over a new inflation multiplier.
    RebaseInitiated {
        /// The new multiplier.
        inflation_multiplier: U256,
    },
    /// The rollup token proxy was pointed at a new implementation.
    UpgradeECOImplementation {
        /// The new implementation.
        implementation: Address,
    },
    /// A bridge proxy was pointed at a new implementation.
    UpgradeSelf {
        /// The new implementation.
        implementation: Address,
    },
}
