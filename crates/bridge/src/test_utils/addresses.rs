//! Well-known accounts of the test deployment.

#![allow(missing_docs)]

use alloy_primitives::{address, Address};
use eco_primitives::L2_CROSS_DOMAIN_MESSENGER_ADDRESS;

pub const ALICE: Address = address!("1111111111111111111111111111111111111111");
pub const BOB: Address = address!("2222222222222222222222222222222222222222");
pub const DEPLOYER: Address = address!("dddddddddddddddddddddddddddddddddddddddd");
pub const UPGRADER: Address = address!("acdcacdcacdcacdcacdcacdcacdcacdcacdcacdc");
pub const RELAYER: Address = address!("5eed5eed5eed5eed5eed5eed5eed5eed5eed5eed");

pub const L1_MESSENGER: Address = address!("25ace71c97b33cc4729cf772ae268934f7ab5fa1");
pub const L1_TOKEN: Address = address!("8dbf9a4c99580fc7fd4024ee08f3994420035727");
pub const L1_BRIDGE: Address = address!("aa2b7dc3ec56380e62e5bc0e5dc3e5dd7e0c6d7b");
pub const L1_BRIDGE_IMPL: Address = address!("a100000000000000000000000000000000000001");
pub const L1_PROXY_ADMIN: Address = address!("a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1");

pub const L2_MESSENGER: Address = L2_CROSS_DOMAIN_MESSENGER_ADDRESS;
pub const L2_TOKEN: Address = address!("e7bc9b3a936f122f08aac3b1fac3c3ec29a78874");
pub const L2_TOKEN_IMPL: Address = address!("b200000000000000000000000000000000000001");
pub const L2_BRIDGE: Address = address!("b9ff4b9d5ed4bcc38d2ae6c8b2ad9d5a8ed5a3c5");
pub const L2_BRIDGE_IMPL: Address = address!("b200000000000000000000000000000000000002");
pub const L2_PROXY_ADMIN: Address = address!("b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2b2");

pub const NEW_IMPL: Address = address!("ffffffffffffffffffffffffffffffffffff0001");
