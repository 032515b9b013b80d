//! Test utilities for the `eco-bridge` crate.

mod tracing;
pub use tracing::{CapturedEvent, CollectingLayer, TraceStorage};

mod token;
pub use token::{MockEscrowToken, MockTokenError, TransferFailure};

pub mod addresses;

mod fixture;
pub use fixture::{deploy_l1, deploy_l2, TestBridges};
