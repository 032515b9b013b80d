//! An in-memory deployment of both domains.

use crate::scenario::{Scenario, Step};
use alloy_primitives::{address, Address, Bytes, U256};
use anyhow::{anyhow, Result};
use eco_bridge::{
    BridgeEvent, L1BridgeConfig, L1ECOBridge, L2BridgeConfig, L2ECOBridge, ProxyAdmin, Relayer,
};
use eco_ledger::RebasingLedger;
use eco_messenger::InMemoryMessenger;
use eco_primitives::{CallContext, DEFAULT_FINALIZATION_GAS, L2_CROSS_DOMAIN_MESSENGER_ADDRESS};
use serde::Serialize;
use std::{collections::BTreeSet, fmt};
use tracing::{info, warn};

pub(crate) const ALICE: Address = address!("1111111111111111111111111111111111111111");

/// Deploys every contract and owns the settlement-layer token policy.
const DEPLOYER: Address = address!("de91000000000000000000000000000000000001");
const UPGRADER: Address = address!("de91000000000000000000000000000000000002");
const RELAYER: Address = address!("de91000000000000000000000000000000000003");

const L1_MESSENGER: Address = address!("e100000000000000000000000000000000000001");
const L1_TOKEN: Address = address!("e100000000000000000000000000000000000002");
const L1_BRIDGE: Address = address!("e100000000000000000000000000000000000003");
const L1_BRIDGE_IMPL: Address = address!("e100000000000000000000000000000000000004");
const L1_PROXY_ADMIN: Address = address!("e100000000000000000000000000000000000005");

const L2_TOKEN: Address = address!("e200000000000000000000000000000000000002");
const L2_TOKEN_IMPL: Address = address!("e200000000000000000000000000000000000006");
const L2_BRIDGE: Address = address!("e200000000000000000000000000000000000003");
const L2_BRIDGE_IMPL: Address = address!("e200000000000000000000000000000000000004");
const L2_PROXY_ADMIN: Address = address!("e200000000000000000000000000000000000005");

/// Both bridges, their tokens, and a relayer carrying messages between them.
#[derive(Debug)]
pub(crate) struct World {
    l1: L1ECOBridge<InMemoryMessenger, RebasingLedger>,
    l2: L2ECOBridge<InMemoryMessenger>,
    relayer: Relayer,
    accounts: BTreeSet<Address>,
    block_number: u64,
    failed_messages: usize,
}

impl World {
    /// Deploys and wires both domains. The bridges own their proxy admins.
    pub(crate) fn deploy() -> Result<Self> {
        let mut l1_token = RebasingLedger::new(L1_TOKEN);
        l1_token.initialize(Address::ZERO, DEPLOYER, DEPLOYER)?;
        let mut l1_admin = ProxyAdmin::new(L1_PROXY_ADMIN, DEPLOYER);
        l1_admin.deploy_proxy(DEPLOYER, L1_BRIDGE, L1_BRIDGE_IMPL)?;
        l1_admin.transfer_ownership(DEPLOYER, L1_BRIDGE)?;
        let mut l1 =
            L1ECOBridge::new(L1_BRIDGE, InMemoryMessenger::new(L1_MESSENGER), l1_token, l1_admin);
        l1.initialize(
            CallContext::eoa(DEPLOYER),
            L1BridgeConfig { l2_bridge: L2_BRIDGE, l2_token: L2_TOKEN, upgrader: UPGRADER },
        )?;

        let mut l2_token = RebasingLedger::new(L2_TOKEN);
        l2_token.initialize(L1_TOKEN, L2_BRIDGE, DEPLOYER)?;
        let mut l2_admin = ProxyAdmin::new(L2_PROXY_ADMIN, DEPLOYER);
        l2_admin.deploy_proxy(DEPLOYER, L2_TOKEN, L2_TOKEN_IMPL)?;
        l2_admin.deploy_proxy(DEPLOYER, L2_BRIDGE, L2_BRIDGE_IMPL)?;
        l2_admin.transfer_ownership(DEPLOYER, L2_BRIDGE)?;
        let mut l2 = L2ECOBridge::new(
            L2_BRIDGE,
            InMemoryMessenger::new(L2_CROSS_DOMAIN_MESSENGER_ADDRESS),
            l2_token,
            l2_admin,
        );
        l2.initialize(
            CallContext::eoa(DEPLOYER),
            L2BridgeConfig { l1_bridge: L1_BRIDGE, l1_token: L1_TOKEN },
        )?;

        Ok(Self {
            l1,
            l2,
            relayer: Relayer::new(RELAYER),
            accounts: BTreeSet::new(),
            block_number: 1,
            failed_messages: 0,
        })
    }

    /// Funds the scenario's accounts and runs its steps in order, stopping at the first step a
    /// bridge rejects. Rejected message deliveries are counted but do not stop the run.
    pub(crate) fn run(&mut self, scenario: &Scenario) -> Result<()> {
        for balance in &scenario.balances {
            self.fund(balance.account, balance.amount)?;
        }
        for (index, step) in scenario.steps.iter().enumerate() {
            info!(target: "sim", "Step {index}: {step}");
            self.step(*step).map_err(|e| anyhow!("Step {index} ({step}) failed: {e}"))?;
            self.block_number += 1;
        }
        Ok(())
    }

    fn fund(&mut self, account: Address, amount: U256) -> Result<()> {
        let token = self.l1.token_mut();
        token.mint(DEPLOYER, account, amount)?;
        token.approve(account, L1_BRIDGE, U256::MAX)?;
        self.accounts.insert(account);
        Ok(())
    }

    fn ctx(&self, account: Address) -> CallContext {
        CallContext::eoa(account).at_block(self.block_number)
    }

    fn step(&mut self, step: Step) -> Result<()> {
        match step {
            Step::Deposit { from, to, amount } => {
                let (ctx, to) = (self.ctx(from), to.unwrap_or(from));
                self.accounts.extend([from, to]);
                self.l1.deposit_erc20_to(
                    ctx,
                    L1_TOKEN,
                    L2_TOKEN,
                    to,
                    amount,
                    DEFAULT_FINALIZATION_GAS,
                    Bytes::new(),
                )?;
            }
            Step::Withdraw { from, to, amount } => {
                let (ctx, to) = (self.ctx(from), to.unwrap_or(from));
                self.accounts.extend([from, to]);
                self.l2.withdraw_to(
                    ctx,
                    L2_TOKEN,
                    to,
                    amount,
                    DEFAULT_FINALIZATION_GAS,
                    Bytes::new(),
                )?;
            }
            Step::L1Rebase { inflation_multiplier } => {
                self.l1.token_mut().rebase(DEPLOYER, inflation_multiplier)?;
            }
            Step::PropagateRebase => {
                let ctx = self.ctx(DEPLOYER);
                self.l1.rebase(ctx, DEFAULT_FINALIZATION_GAS)?;
            }
            Step::Relay => {
                let mut outcomes = self.relayer.relay_to_l2(&mut self.l1, &mut self.l2);
                outcomes.extend(self.relayer.relay_to_l1(&mut self.l2, &mut self.l1));
                let failed = outcomes.iter().filter(|outcome| !outcome.is_relayed()).count();
                if failed > 0 {
                    warn!(target: "sim", "{failed} of {} messages failed to relay", outcomes.len());
                }
                self.failed_messages += failed;
            }
            Step::UpgradeEco { implementation } => {
                let ctx = self.ctx(UPGRADER);
                self.l1.upgrade_eco(ctx, implementation, DEFAULT_FINALIZATION_GAS)?;
            }
        }
        Ok(())
    }

    /// Captures the current state of both domains.
    pub(crate) fn report(&self) -> Report {
        let l1_token = self.l1.token();
        let l2_token = self.l2.ledger();
        Report {
            escrow: self.l1.escrow(),
            l1_inflation_multiplier: l1_token.inflation_multiplier(),
            l2_inflation_multiplier: l2_token.inflation_multiplier(),
            l2_total_supply: l2_token.total_supply(),
            l2_token_implementation: self.l2.proxy_admin().implementation(L2_TOKEN),
            failed_messages: self.failed_messages,
            accounts: self
                .accounts
                .iter()
                .map(|&address| AccountReport {
                    address,
                    l1_balance: l1_token.balance_of(address),
                    l1_base_balance: l1_token.base_balance_of(address),
                    l2_balance: l2_token.balance_of(address),
                    l2_base_balance: l2_token.base_balance_of(address),
                })
                .collect(),
            l1_events: self.l1.events().to_vec(),
            l2_events: self.l2.events().to_vec(),
        }
    }
}

/// The state of both domains after a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Report {
    pub(crate) escrow: U256,
    pub(crate) l1_inflation_multiplier: U256,
    pub(crate) l2_inflation_multiplier: U256,
    pub(crate) l2_total_supply: U256,
    pub(crate) l2_token_implementation: Option<Address>,
    pub(crate) failed_messages: usize,
    pub(crate) accounts: Vec<AccountReport>,
    pub(crate) l1_events: Vec<BridgeEvent>,
    pub(crate) l2_events: Vec<BridgeEvent>,
}

/// Balances of a single account in both domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccountReport {
    pub(crate) address: Address,
    pub(crate) l1_balance: U256,
    pub(crate) l1_base_balance: U256,
    pub(crate) l2_balance: U256,
    pub(crate) l2_base_balance: U256,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "escrow:                  {}", self.escrow)?;
        writeln!(f, "L1 inflation multiplier: {}", self.l1_inflation_multiplier)?;
        writeln!(f, "L2 inflation multiplier: {}", self.l2_inflation_multiplier)?;
        writeln!(f, "L2 total supply:         {}", self.l2_total_supply)?;
        if let Some(implementation) = self.l2_token_implementation {
            writeln!(f, "L2 token implementation: {implementation}")?;
        }
        if self.failed_messages > 0 {
            writeln!(f, "failed messages:         {}", self.failed_messages)?;
        }
        for account in &self.accounts {
            writeln!(f, "{}", account.address)?;
            writeln!(f, "  L1: {} ({} base)", account.l1_balance, account.l1_base_balance)?;
            writeln!(f, "  L2: {} ({} base)", account.l2_balance, account.l2_base_balance)?;
        }
        Ok(())
    }
}
