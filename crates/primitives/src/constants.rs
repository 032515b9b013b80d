//! Well-known addresses and defaults.

use alloy_primitives::{address, Address};

/// The address of the L2 cross domain messenger predeploy.
pub const L2_CROSS_DOMAIN_MESSENGER_ADDRESS: Address =
    address!("4200000000000000000000000000000000000007");

/// The gas limit bridges request for finalizing a message on the counterpart domain when the
/// caller does not pick one.
pub const DEFAULT_FINALIZATION_GAS: u32 = 1_200_000;
