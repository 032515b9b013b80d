#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(test, feature = "test-utils")), warn(unused_crate_dependencies))]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod errors;
pub use errors::{BridgeError, BridgeResult, ProxyError, ProxyResult};

mod events;
pub use events::BridgeEvent;

mod proxy;
pub use proxy::ProxyAdmin;

mod config;
pub use config::{L1BridgeConfig, L2BridgeConfig};

mod auth;

mod l1;
pub use l1::L1ECOBridge;

mod l2;
pub use l2::L2ECOBridge;

mod relay;
pub use relay::{RelayOutcome, Relayer};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
