//! One-time bridge configuration.

use alloy_primitives::Address;

/// The peers and authorities of an [L1ECOBridge].
///
/// [L1ECOBridge]: crate::L1ECOBridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct L1BridgeConfig {
    /// The rollup bridge that deposits are sent to and withdrawals arrive from.
    pub l2_bridge: Address,
    /// The rollup token deposits are minted as.
    pub l2_token: Address,
    /// The only account allowed to trigger upgrades.
    pub upgrader: Address,
}

/// The peers of an [L2ECOBridge].
///
/// [L2ECOBridge]: crate::L2ECOBridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct L2BridgeConfig {
    /// The settlement-layer bridge that deposits and admin messages arrive from.
    pub l1_bridge: Address,
    /// The settlement-layer token the rollup token mirrors.
    pub l1_token: Address,
}
