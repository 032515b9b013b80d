#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(test), no_std)]

mod units;
pub use units::{
    to_base, to_real, UnitsError, UnitsResult, INFLATION_MULTIPLIER_SCALE,
    INITIAL_INFLATION_MULTIPLIER,
};

mod context;
pub use context::CallContext;

mod kind;
pub use kind::ErrorKind;

mod constants;
pub use constants::{DEFAULT_FINALIZATION_GAS, L2_CROSS_DOMAIN_MESSENGER_ADDRESS};
