//! A wired pair of bridges on top of in-memory messengers.

use super::{addresses::*, MockEscrowToken};
use crate::{
    BridgeResult, L1BridgeConfig, L1ECOBridge, L2BridgeConfig, L2ECOBridge, ProxyAdmin,
    RelayOutcome, Relayer,
};
use alloc::vec::Vec;
use alloy_primitives::{Address, Bytes, B256, U256};
use eco_ledger::RebasingLedger;
use eco_messenger::InMemoryMessenger;
use eco_primitives::{CallContext, DEFAULT_FINALIZATION_GAS};

/// Deploys and initializes the settlement-layer bridge.
///
/// The bridge proxy is registered with the settlement-layer proxy admin, whose ownership is then
/// handed to the bridge itself.
pub fn deploy_l1() -> L1ECOBridge<InMemoryMessenger, MockEscrowToken> {
    let mut proxy_admin = ProxyAdmin::new(L1_PROXY_ADMIN, DEPLOYER);
    proxy_admin.deploy_proxy(DEPLOYER, L1_BRIDGE, L1_BRIDGE_IMPL).unwrap();
    proxy_admin.transfer_ownership(DEPLOYER, L1_BRIDGE).unwrap();

    let mut bridge = L1ECOBridge::new(
        L1_BRIDGE,
        InMemoryMessenger::new(L1_MESSENGER),
        MockEscrowToken::new(L1_TOKEN),
        proxy_admin,
    );
    bridge
        .initialize(
            CallContext::eoa(DEPLOYER),
            L1BridgeConfig { l2_bridge: L2_BRIDGE, l2_token: L2_TOKEN, upgrader: UPGRADER },
        )
        .unwrap();
    bridge
}

/// Deploys and initializes the rollup bridge together with its token.
///
/// The token grants all roles to the bridge and keeps [DEPLOYER] as role admin. Both proxies are
/// registered with the rollup proxy admin, which is then owned by the bridge.
pub fn deploy_l2() -> L2ECOBridge<InMemoryMessenger> {
    let mut ledger = RebasingLedger::new(L2_TOKEN);
    ledger.initialize(L1_TOKEN, L2_BRIDGE, DEPLOYER).unwrap();

    let mut proxy_admin = ProxyAdmin::new(L2_PROXY_ADMIN, DEPLOYER);
    proxy_admin.deploy_proxy(DEPLOYER, L2_TOKEN, L2_TOKEN_IMPL).unwrap();
    proxy_admin.deploy_proxy(DEPLOYER, L2_BRIDGE, L2_BRIDGE_IMPL).unwrap();
    proxy_admin.transfer_ownership(DEPLOYER, L2_BRIDGE).unwrap();

    let mut bridge =
        L2ECOBridge::new(L2_BRIDGE, InMemoryMessenger::new(L2_MESSENGER), ledger, proxy_admin);
    bridge
        .initialize(
            CallContext::eoa(DEPLOYER),
            L2BridgeConfig { l1_bridge: L1_BRIDGE, l1_token: L1_TOKEN },
        )
        .unwrap();
    bridge
}

/// Both bridges and a relayer that carries messages between them.
#[derive(Debug)]
pub struct TestBridges {
    /// The settlement-layer bridge.
    pub l1: L1ECOBridge<InMemoryMessenger, MockEscrowToken>,
    /// The rollup bridge.
    pub l2: L2ECOBridge<InMemoryMessenger>,
    /// Delivers queued messages, signing as [RELAYER].
    pub relayer: Relayer,
}

impl Default for TestBridges {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBridges {
    /// Deploys both bridges.
    pub fn new() -> Self {
        Self { l1: deploy_l1(), l2: deploy_l2(), relayer: Relayer::new(RELAYER) }
    }

    /// Mints `amount` settlement-layer tokens to `account` and approves the bridge to spend them.
    pub fn fund(&mut self, account: Address, amount: U256) {
        let token = self.l1.token_mut();
        token.fund(account, amount);
        token.ledger.approve(account, L1_BRIDGE, U256::MAX).unwrap();
    }

    /// Deposits `amount` real tokens from `from` to `to` on the rollup.
    pub fn deposit(&mut self, from: Address, to: Address, amount: U256) -> BridgeResult<B256> {
        self.l1.deposit_erc20_to(
            CallContext::eoa(from),
            L1_TOKEN,
            L2_TOKEN,
            to,
            amount,
            DEFAULT_FINALIZATION_GAS,
            Bytes::new(),
        )
    }

    /// Withdraws `amount` real tokens from `from` on the rollup to `to` on the settlement layer.
    pub fn withdraw(&mut self, from: Address, to: Address, amount: U256) -> BridgeResult<B256> {
        self.l2.withdraw_to(
            CallContext::eoa(from),
            L2_TOKEN,
            to,
            amount,
            DEFAULT_FINALIZATION_GAS,
            Bytes::new(),
        )
    }

    /// Delivers every pending settlement-layer message to the rollup.
    pub fn relay_to_l2(&mut self) -> Vec<RelayOutcome> {
        self.relayer.relay_to_l2(&mut self.l1, &mut self.l2)
    }

    /// Delivers every pending rollup message to the settlement layer.
    pub fn relay_to_l1(&mut self) -> Vec<RelayOutcome> {
        self.relayer.relay_to_l1(&mut self.l2, &mut self.l1)
    }
}
