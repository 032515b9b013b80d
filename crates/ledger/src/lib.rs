#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod errors;
pub use errors::{LedgerError, LedgerResult};

mod events;
pub use events::LedgerEvent;

mod roles;
pub use roles::{Role, TokenRoles};

mod allowance;
pub use allowance::Allowances;

mod rebasing;
pub use rebasing::RebasingLedger;

mod mintable;
pub use mintable::MintableLedger;

mod traits;
pub use traits::EscrowToken;
