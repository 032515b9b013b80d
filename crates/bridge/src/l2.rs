//! The rollup bridge.

use crate::{
    auth::ensure_from_peer, BridgeError, BridgeEvent, BridgeResult, L2BridgeConfig, ProxyAdmin,
};
use alloc::vec::Vec;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolInterface};
use eco_ledger::RebasingLedger;
use eco_messenger::{
    abi::{IL1ECOBridge, IL2ECOBridge},
    CrossDomainMessenger, MessageError,
};
use eco_primitives::CallContext;
use tracing::{info, warn};

/// Mints and burns the rollup mirror of the token.
///
/// The bridge accepts exactly one token pair: the settlement-layer token it was configured with
/// and the [RebasingLedger] it owns. It must hold the minter, burner and rebaser roles on that
/// ledger and own the [ProxyAdmin] it upgrades through; neither is checked at runtime, and a
/// missing role or ownership surfaces as the ledger's or the bridge's error when used.
#[derive(Debug)]
pub struct L2ECOBridge<M> {
    address: Address,
    messenger: M,
    ledger: RebasingLedger,
    proxy_admin: ProxyAdmin,
    config: Option<L2BridgeConfig>,
    eco_upgrade_block: U256,
    self_upgrade_block: U256,
    events: Vec<BridgeEvent>,
}

impl<M: CrossDomainMessenger> L2ECOBridge<M> {
    /// Creates an uninitialized bridge at `address` in front of `ledger`.
    pub const fn new(
        address: Address,
        messenger: M,
        ledger: RebasingLedger,
        proxy_admin: ProxyAdmin,
    ) -> Self {
        Self {
            address,
            messenger,
            ledger,
            proxy_admin,
            config: None,
            eco_upgrade_block: U256::ZERO,
            self_upgrade_block: U256::ZERO,
            events: Vec::new(),
        }
    }

    /// One-time initializer.
    pub fn initialize(&mut self, ctx: CallContext, config: L2BridgeConfig) -> BridgeResult<()> {
        if self.config.is_some() {
            return Err(BridgeError::AlreadyInitialized);
        }
        self.config = Some(config);
        info!(
            target: "l2-bridge",
            "Initialized by {} with L1 bridge {}, L1 token {}",
            ctx.sender, config.l1_bridge, config.l1_token
        );
        Ok(())
    }

    /// Returns the configuration, failing if the bridge was never initialized.
    pub fn config(&self) -> BridgeResult<&L2BridgeConfig> {
        self.config.as_ref().ok_or(BridgeError::NotInitialized)
    }

    /// Returns the address of the bridge.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the rollup ledger.
    pub const fn ledger(&self) -> &RebasingLedger {
        &self.ledger
    }

    /// Returns the rollup ledger mutably.
    pub fn ledger_mut(&mut self) -> &mut RebasingLedger {
        &mut self.ledger
    }

    /// Returns the messenger.
    pub const fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Returns the messenger mutably.
    pub fn messenger_mut(&mut self) -> &mut M {
        &mut self.messenger
    }

    /// Returns the proxy admin.
    pub const fn proxy_admin(&self) -> &ProxyAdmin {
        &self.proxy_admin
    }

    /// Returns the proxy admin mutably.
    pub fn proxy_admin_mut(&mut self) -> &mut ProxyAdmin {
        &mut self.proxy_admin
    }

    /// Returns every event emitted so far.
    pub fn events(&self) -> &[BridgeEvent] {
        &self.events
    }

    /// Drains the emitted events.
    pub fn take_events(&mut self) -> Vec<BridgeEvent> {
        core::mem::take(&mut self.events)
    }

    /// Returns the multiplier of the rollup ledger.
    pub const fn inflation_multiplier(&self) -> U256 {
        self.ledger.inflation_multiplier()
    }

    /// Returns the settlement-layer block number of the last applied token upgrade.
    pub const fn eco_upgrade_block(&self) -> U256 {
        self.eco_upgrade_block
    }

    /// Returns the settlement-layer block number of the last applied bridge upgrade.
    pub const fn self_upgrade_block(&self) -> U256 {
        self.self_upgrade_block
    }

    /// Mints a deposit escrowed on the settlement layer. `amount` is in base units.
    ///
    /// Only callable by the messenger while it relays a message from the settlement-layer
    /// bridge.
    #[allow(clippy::too_many_arguments)]
    pub fn finalize_deposit(
        &mut self,
        ctx: CallContext,
        l1_token: Address,
        l2_token: Address,
        from: Address,
        to: Address,
        amount: U256,
        data: Bytes,
    ) -> BridgeResult<()> {
        let config = *self.config()?;
        self.ensure_from_l1_bridge(&ctx, &config, "deposit")?;
        if l2_token != self.ledger.address() {
            return Err(BridgeError::InvalidL2Address(l2_token));
        }
        if l1_token != config.l1_token {
            return Err(BridgeError::InvalidL1Address(l1_token));
        }

        let real = self.ledger.to_real(amount)?;
        self.ledger.mint_base(self.address, to, amount)?;
        self.events.push(BridgeEvent::DepositFinalized {
            l1_token,
            l2_token,
            from,
            to,
            amount: real,
            data,
        });
        info!(target: "l2-bridge", "Deposit of {real} ({amount} base) from {from} to {to} finalized");
        Ok(())
    }

    /// Burns `amount` real tokens from the caller and withdraws them to the same account on the
    /// settlement layer.
    pub fn withdraw(
        &mut self,
        ctx: CallContext,
        l2_token: Address,
        amount: U256,
        l1_gas: u32,
        data: Bytes,
    ) -> BridgeResult<B256> {
        self.initiate_withdrawal(ctx, l2_token, ctx.sender, amount, l1_gas, data)
    }

    /// Burns `amount` real tokens from the caller and withdraws them to `to` on the settlement
    /// layer.
    pub fn withdraw_to(
        &mut self,
        ctx: CallContext,
        l2_token: Address,
        to: Address,
        amount: U256,
        l1_gas: u32,
        data: Bytes,
    ) -> BridgeResult<B256> {
        self.initiate_withdrawal(ctx, l2_token, to, amount, l1_gas, data)
    }

    fn initiate_withdrawal(
        &mut self,
        ctx: CallContext,
        l2_token: Address,
        to: Address,
        amount: U256,
        l1_gas: u32,
        data: Bytes,
    ) -> BridgeResult<B256> {
        let config = *self.config()?;
        if l2_token != self.ledger.address() {
            return Err(BridgeError::InvalidL2Address(l2_token));
        }

        let base = self.ledger.burn(self.address, ctx.sender, amount)?;
        let call = IL1ECOBridge::finalizeERC20WithdrawalCall {
            l1Token: config.l1_token,
            l2Token: l2_token,
            from: ctx.sender,
            to,
            amount: base,
            data: data.clone(),
        };
        let hash =
            self.messenger.send_message(self.address, config.l1_bridge, call.abi_encode().into(), l1_gas);

        self.events.push(BridgeEvent::WithdrawalInitiated {
            l1_token: config.l1_token,
            l2_token,
            from: ctx.sender,
            to,
            amount,
            data,
        });
        info!(
            target: "l2-bridge",
            "Withdrawal of {amount} ({base} base) from {} to {to} initiated ({hash})", ctx.sender
        );
        Ok(hash)
    }

    /// Applies the settlement-layer multiplier to the rollup ledger.
    pub fn rebase(&mut self, ctx: CallContext, inflation_multiplier: U256) -> BridgeResult<()> {
        let config = *self.config()?;
        self.ensure_from_l1_bridge(&ctx, &config, "rebase")?;
        if inflation_multiplier.is_zero() {
            return Err(BridgeError::InvalidInflationMultiplier);
        }

        self.ledger.rebase(self.address, inflation_multiplier)?;
        self.events.push(BridgeEvent::RebaseInitiated { inflation_multiplier });
        info!(target: "l2-bridge", "Rebased to {inflation_multiplier}");
        Ok(())
    }

    /// Points the rollup token proxy at `implementation`.
    ///
    /// `block_number` is the settlement-layer block the upgrade was requested in and must be
    /// greater than that of the last applied token upgrade.
    pub fn upgrade_eco(
        &mut self,
        ctx: CallContext,
        implementation: Address,
        block_number: U256,
    ) -> BridgeResult<()> {
        let config = *self.config()?;
        self.ensure_from_l1_bridge(&ctx, &config, "token upgrade")?;
        Self::ensure_newer(self.eco_upgrade_block, block_number)?;
        self.ensure_owns_proxy_admin()?;

        self.proxy_admin.upgrade(self.address, self.ledger.address(), implementation)?;
        self.eco_upgrade_block = block_number;
        self.events.push(BridgeEvent::UpgradeECOImplementation { implementation });
        info!(target: "l2-bridge", "Token upgraded to {implementation} (L1 block {block_number})");
        Ok(())
    }

    /// Points this bridge's own proxy at `implementation`.
    ///
    /// `block_number` follows the same ordering rule as [Self::upgrade_eco], tracked separately.
    pub fn upgrade_self(
        &mut self,
        ctx: CallContext,
        implementation: Address,
        block_number: U256,
    ) -> BridgeResult<()> {
        let config = *self.config()?;
        self.ensure_from_l1_bridge(&ctx, &config, "bridge upgrade")?;
        Self::ensure_newer(self.self_upgrade_block, block_number)?;
        self.ensure_owns_proxy_admin()?;

        self.proxy_admin.upgrade(self.address, self.address, implementation)?;
        self.self_upgrade_block = block_number;
        self.events.push(BridgeEvent::UpgradeSelf { implementation });
        info!(target: "l2-bridge", "Bridge upgraded to {implementation} (L1 block {block_number})");
        Ok(())
    }

    /// Decodes `calldata` and dispatches it to the matching channel-gated handler.
    pub fn relay(&mut self, ctx: CallContext, calldata: &[u8]) -> BridgeResult<()> {
        let call = IL2ECOBridge::IL2ECOBridgeCalls::abi_decode(calldata, true)
            .map_err(MessageError::from)?;
        match call {
            IL2ECOBridge::IL2ECOBridgeCalls::finalizeDeposit(call) => self.finalize_deposit(
                ctx,
                call.l1Token,
                call.l2Token,
                call.from,
                call.to,
                call.amount,
                call.data,
            ),
            IL2ECOBridge::IL2ECOBridgeCalls::rebase(call) => {
                self.rebase(ctx, call.inflationMultiplier)
            }
            IL2ECOBridge::IL2ECOBridgeCalls::upgradeECO(call) => {
                self.upgrade_eco(ctx, call.implementation, call.blockNumber)
            }
            IL2ECOBridge::IL2ECOBridgeCalls::upgradeSelf(call) => {
                self.upgrade_self(ctx, call.implementation, call.blockNumber)
            }
        }
    }

    fn ensure_from_l1_bridge(
        &self,
        ctx: &CallContext,
        config: &L2BridgeConfig,
        action: &str,
    ) -> BridgeResult<()> {
        ensure_from_peer(&self.messenger, ctx, config.l1_bridge).inspect_err(|err| {
            warn!(target: "l2-bridge", "Rejected {action}: {err}");
        })
    }

    fn ensure_newer(last: U256, received: U256) -> BridgeResult<()> {
        if received <= last {
            return Err(BridgeError::InvalidUpgradeBlock { last, received });
        }
        Ok(())
    }

    fn ensure_owns_proxy_admin(&self) -> BridgeResult<()> {
        let owner = self.proxy_admin.owner();
        if owner != self.address {
            return Err(BridgeError::NotOwner(owner));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{addresses::*, deploy_l2};
    use eco_messenger::InMemoryMessenger;
    use eco_primitives::{ErrorKind, INITIAL_INFLATION_MULTIPLIER};

    type Bridge = L2ECOBridge<InMemoryMessenger>;

    fn relay_ctx(bridge: &mut Bridge, sender: Address) -> CallContext {
        bridge.messenger_mut().set_x_domain_message_sender(Some(sender));
        CallContext::contract(L2_MESSENGER, RELAYER)
    }

    fn deposit(bridge: &mut Bridge, to: Address, base: u64) {
        let ctx = relay_ctx(bridge, L1_BRIDGE);
        bridge
            .finalize_deposit(ctx, L1_TOKEN, L2_TOKEN, to, to, U256::from(base), Bytes::new())
            .unwrap();
        bridge.messenger_mut().set_x_domain_message_sender(None);
    }

    #[test]
    fn test_finalize_deposit_requires_messenger() {
        let mut bridge = deploy_l2();
        let err = bridge
            .finalize_deposit(
                CallContext::eoa(ALICE),
                L1_TOKEN,
                L2_TOKEN,
                ALICE,
                ALICE,
                U256::from(100),
                Bytes::new(),
            )
            .unwrap_err();
        assert_eq!(err, BridgeError::InvalidMessenger(ALICE));
        assert_eq!(bridge.ledger().balance_of(ALICE), U256::ZERO);
    }

    #[test]
    fn test_finalize_deposit_requires_l1_bridge_sender() {
        let mut bridge = deploy_l2();
        let ctx = relay_ctx(&mut bridge, BOB);
        let err = bridge
            .finalize_deposit(ctx, L1_TOKEN, L2_TOKEN, ALICE, ALICE, U256::from(100), Bytes::new())
            .unwrap_err();
        assert_eq!(err, BridgeError::InvalidCrossDomainSender(BOB));
        assert_eq!(bridge.ledger().base_total_supply(), U256::ZERO);
        assert!(bridge.events().is_empty());
    }

    #[test]
    fn test_finalize_deposit_only_accepts_configured_pair() {
        let mut bridge = deploy_l2();
        let ctx = relay_ctx(&mut bridge, L1_BRIDGE);
        let err = bridge
            .finalize_deposit(ctx, L1_TOKEN, ALICE, ALICE, BOB, U256::ZERO, Bytes::new())
            .unwrap_err();
        assert_eq!(err, BridgeError::InvalidL2Address(ALICE));
        assert_eq!(err.kind(), ErrorKind::InvalidToken);

        let err = bridge
            .finalize_deposit(ctx, ALICE, L2_TOKEN, ALICE, BOB, U256::ZERO, Bytes::new())
            .unwrap_err();
        assert_eq!(err, BridgeError::InvalidL1Address(ALICE));
    }

    #[test]
    fn test_finalize_deposit_mints_base_units() {
        let mut bridge = deploy_l2();
        let ctx = relay_ctx(&mut bridge, L1_BRIDGE);
        bridge.rebase(ctx, INITIAL_INFLATION_MULTIPLIER / U256::from(4)).unwrap();

        bridge
            .finalize_deposit(ctx, L1_TOKEN, L2_TOKEN, ALICE, BOB, U256::from(400), Bytes::new())
            .unwrap();

        assert_eq!(bridge.ledger().base_balance_of(BOB), U256::from(400));
        assert_eq!(bridge.ledger().balance_of(BOB), U256::from(100));
        assert_eq!(
            bridge.events().last(),
            Some(&BridgeEvent::DepositFinalized {
                l1_token: L1_TOKEN,
                l2_token: L2_TOKEN,
                from: ALICE,
                to: BOB,
                amount: U256::from(100),
                data: Bytes::new(),
            })
        );
    }

    #[test]
    fn test_withdraw_rejects_other_tokens() {
        let mut bridge = deploy_l2();
        deposit(&mut bridge, ALICE, 1_000);
        let err = bridge
            .withdraw(CallContext::eoa(ALICE), BOB, U256::from(10), 0, Bytes::new())
            .unwrap_err();
        assert_eq!(err, BridgeError::InvalidL2Address(BOB));
        assert_eq!(bridge.ledger().balance_of(ALICE), U256::from(1_000));
    }

    #[test]
    fn test_withdraw_burns_and_sends_base_amount() {
        let mut bridge = deploy_l2();
        deposit(&mut bridge, ALICE, 1_000);
        let ctx = relay_ctx(&mut bridge, L1_BRIDGE);
        bridge.rebase(ctx, INITIAL_INFLATION_MULTIPLIER / U256::from(2)).unwrap();
        bridge.messenger_mut().set_x_domain_message_sender(None);

        let hash = bridge
            .withdraw(CallContext::eoa(ALICE), L2_TOKEN, U256::from(100), 0, Bytes::from_static(b"x"))
            .unwrap();

        assert_eq!(bridge.ledger().base_balance_of(ALICE), U256::from(800));
        assert_eq!(bridge.ledger().balance_of(ALICE), U256::from(400));

        let message = bridge.messenger_mut().take_outbox().remove(0);
        assert_eq!(message.hash(), hash);
        assert_eq!(message.target, L1_BRIDGE);
        let expected = IL1ECOBridge::finalizeERC20WithdrawalCall {
            l1Token: L1_TOKEN,
            l2Token: L2_TOKEN,
            from: ALICE,
            to: ALICE,
            amount: U256::from(200),
            data: Bytes::from_static(b"x"),
        };
        assert_eq!(message.message, Bytes::from(expected.abi_encode()));
    }

    #[test]
    fn test_withdraw_to_recipient() {
        let mut bridge = deploy_l2();
        deposit(&mut bridge, ALICE, 1_000);
        bridge
            .withdraw_to(CallContext::eoa(ALICE), L2_TOKEN, BOB, U256::from(1_000), 0, Bytes::new())
            .unwrap();

        let message = bridge.messenger_mut().take_outbox().remove(0);
        let IL1ECOBridge::IL1ECOBridgeCalls::finalizeERC20Withdrawal(call) =
            IL1ECOBridge::IL1ECOBridgeCalls::abi_decode(&message.message, true).unwrap();
        assert_eq!((call.from, call.to, call.amount), (ALICE, BOB, U256::from(1_000)));
        assert_eq!(bridge.ledger().total_supply(), U256::ZERO);
    }

    #[test]
    fn test_withdraw_more_than_balance_fails() {
        let mut bridge = deploy_l2();
        deposit(&mut bridge, ALICE, 10);
        let err = bridge
            .withdraw(CallContext::eoa(ALICE), L2_TOKEN, U256::from(11), 0, Bytes::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAmount);
        assert!(bridge.messenger().pending().is_empty());
    }

    #[test]
    fn test_rebase_validates_sender_and_multiplier() {
        let mut bridge = deploy_l2();
        assert_eq!(
            bridge.rebase(CallContext::eoa(ALICE), U256::from(1)),
            Err(BridgeError::InvalidMessenger(ALICE))
        );

        let ctx = relay_ctx(&mut bridge, BOB);
        assert_eq!(bridge.rebase(ctx, U256::from(1)), Err(BridgeError::InvalidCrossDomainSender(BOB)));

        let ctx = relay_ctx(&mut bridge, L1_BRIDGE);
        assert_eq!(bridge.rebase(ctx, U256::ZERO), Err(BridgeError::InvalidInflationMultiplier));
        assert_eq!(bridge.inflation_multiplier(), INITIAL_INFLATION_MULTIPLIER);

        bridge.rebase(ctx, U256::from(7)).unwrap();
        assert_eq!(bridge.inflation_multiplier(), U256::from(7));
        assert_eq!(
            bridge.events().last(),
            Some(&BridgeEvent::RebaseInitiated { inflation_multiplier: U256::from(7) })
        );
    }

    #[test]
    fn test_rebase_without_rebaser_role_fails() {
        let mut bridge = deploy_l2();
        bridge.ledger_mut().update_rebasers(DEPLOYER, L2_BRIDGE, false).unwrap();
        let ctx = relay_ctx(&mut bridge, L1_BRIDGE);
        let err = bridge.rebase(ctx, U256::from(2)).unwrap_err();
        assert_eq!(err, BridgeError::Ledger(eco_ledger::LedgerError::UnauthorizedRebaser(L2_BRIDGE)));
        assert_eq!(err.kind(), ErrorKind::UnauthorizedRole);
        assert!(bridge.events().is_empty());
    }

    #[test]
    fn test_upgrade_eco_through_owned_proxy_admin() {
        let mut bridge = deploy_l2();
        let ctx = relay_ctx(&mut bridge, L1_BRIDGE);
        bridge.upgrade_eco(ctx, NEW_IMPL, U256::from(5)).unwrap();
        assert_eq!(bridge.proxy_admin().implementation(L2_TOKEN), Some(NEW_IMPL));
        assert_eq!(bridge.eco_upgrade_block(), U256::from(5));
        assert_eq!(
            bridge.events().last(),
            Some(&BridgeEvent::UpgradeECOImplementation { implementation: NEW_IMPL })
        );
    }

    #[test]
    fn test_upgrade_requires_proxy_admin_ownership() {
        let mut bridge = deploy_l2();
        bridge.proxy_admin_mut().transfer_ownership(L2_BRIDGE, DEPLOYER).unwrap();
        let ctx = relay_ctx(&mut bridge, L1_BRIDGE);

        let err = bridge.upgrade_eco(ctx, NEW_IMPL, U256::from(1)).unwrap_err();
        assert_eq!(err, BridgeError::NotOwner(DEPLOYER));
        assert_eq!(err.kind(), ErrorKind::NotOwner);
        assert_eq!(bridge.proxy_admin().implementation(L2_TOKEN), Some(L2_TOKEN_IMPL));
        assert_eq!(bridge.eco_upgrade_block(), U256::ZERO);
    }

    #[test]
    fn test_stale_upgrades_are_rejected() {
        let mut bridge = deploy_l2();
        let ctx = relay_ctx(&mut bridge, L1_BRIDGE);
        bridge.upgrade_eco(ctx, NEW_IMPL, U256::from(10)).unwrap();

        assert_eq!(
            bridge.upgrade_eco(ctx, L2_TOKEN_IMPL, U256::from(10)),
            Err(BridgeError::InvalidUpgradeBlock { last: U256::from(10), received: U256::from(10) })
        );
        assert_eq!(
            bridge.upgrade_eco(ctx, L2_TOKEN_IMPL, U256::from(9)),
            Err(BridgeError::InvalidUpgradeBlock { last: U256::from(10), received: U256::from(9) })
        );
        assert_eq!(bridge.proxy_admin().implementation(L2_TOKEN), Some(NEW_IMPL));

        // Bridge upgrades are ordered independently of token upgrades.
        bridge.upgrade_self(ctx, NEW_IMPL, U256::from(3)).unwrap();
        assert_eq!(bridge.proxy_admin().implementation(L2_BRIDGE), Some(NEW_IMPL));
        assert_eq!(bridge.self_upgrade_block(), U256::from(3));
    }

    #[test]
    fn test_upgrade_self_requires_l1_bridge() {
        let mut bridge = deploy_l2();
        let ctx = relay_ctx(&mut bridge, UPGRADER);
        assert_eq!(
            bridge.upgrade_self(ctx, NEW_IMPL, U256::from(1)),
            Err(BridgeError::InvalidCrossDomainSender(UPGRADER))
        );
    }

    #[test]
    fn test_relay_dispatches_decoded_calls() {
        let mut bridge = deploy_l2();
        let ctx = relay_ctx(&mut bridge, L1_BRIDGE);
        let calldata = IL2ECOBridge::rebaseCall { inflationMultiplier: U256::from(3) }.abi_encode();
        bridge.relay(ctx, &calldata).unwrap();
        assert_eq!(bridge.inflation_multiplier(), U256::from(3));

        assert!(matches!(
            bridge.relay(ctx, &[0xde, 0xad, 0xbe, 0xef]),
            Err(BridgeError::Message(MessageError::Decode(_)))
        ));
    }
}
