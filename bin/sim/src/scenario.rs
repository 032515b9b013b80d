//! Scenario files.

use crate::world::ALICE;
use alloy_primitives::{Address, U256};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};

/// A sequence of actions run against a freshly deployed pair of bridges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Scenario {
    /// Settlement-layer tokens minted before the first step. Funded accounts approve the bridge
    /// for their whole balance.
    #[serde(default)]
    pub(crate) balances: Vec<Balance>,
    /// The steps, in execution order.
    pub(crate) steps: Vec<Step>,
}

/// An initial settlement-layer balance, in real units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Balance {
    pub(crate) account: Address,
    pub(crate) amount: U256,
}

/// A single scenario step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub(crate) enum Step {
    /// Deposits `amount` real tokens from `from` to `to` (or back to `from`) on the rollup.
    Deposit {
        from: Address,
        #[serde(default)]
        to: Option<Address>,
        amount: U256,
    },
    /// Withdraws `amount` real tokens from `from` on the rollup to `to` (or `from`).
    Withdraw {
        from: Address,
        #[serde(default)]
        to: Option<Address>,
        amount: U256,
    },
    /// Rebases the settlement-layer token.
    L1Rebase { inflation_multiplier: U256 },
    /// Sends the current settlement-layer multiplier to the rollup.
    PropagateRebase,
    /// Delivers every pending message, rollup-bound first.
    Relay,
    /// Asks the rollup bridge to upgrade the rollup token.
    UpgradeEco { implementation: Address },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit { from, to, amount } => {
                write!(f, "deposit {amount} from {from} to {}", to.unwrap_or(*from))
            }
            Self::Withdraw { from, to, amount } => {
                write!(f, "withdraw {amount} from {from} to {}", to.unwrap_or(*from))
            }
            Self::L1Rebase { inflation_multiplier } => write!(f, "l1_rebase {inflation_multiplier}"),
            Self::PropagateRebase => f.write_str("propagate_rebase"),
            Self::Relay => f.write_str("relay"),
            Self::UpgradeEco { implementation } => write!(f, "upgrade_eco {implementation}"),
        }
    }
}

impl Scenario {
    /// Reads a scenario from a JSON file.
    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Error reading scenario file {}: {e}", path.display()))?;
        serde_json::from_str(&raw).map_err(|e| anyhow!("Error deserializing scenario: {e}"))
    }

    /// A deposit of 500 tokens followed by their full withdrawal, at the initial multiplier.
    pub(crate) fn round_trip() -> Self {
        let amount = U256::from(500);
        Self {
            balances: vec![Balance { account: ALICE, amount }],
            steps: vec![
                Step::Deposit { from: ALICE, to: None, amount },
                Step::Relay,
                Step::Withdraw { from: ALICE, to: None, amount },
                Step::Relay,
            ],
        }
    }
}
