#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod abi;

mod message;
pub use message::{CrossDomainMessage, MessageStatus};

mod traits;
pub use traits::CrossDomainMessenger;

mod memory;
pub use memory::InMemoryMessenger;

mod errors;
pub use errors::{MessageError, MessageResult};
