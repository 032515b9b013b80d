//! The settlement-layer bridge.

use crate::{
    auth::ensure_from_peer, BridgeError, BridgeEvent, BridgeResult, L1BridgeConfig, ProxyAdmin,
};
use alloc::{string::ToString, vec::Vec};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolInterface};
use eco_ledger::EscrowToken;
use eco_messenger::{
    abi::{IL1ECOBridge, IL2ECOBridge},
    CrossDomainMessenger,
};
use eco_primitives::{to_base, to_real, CallContext};
use tracing::{debug, info, warn};

/// Escrows the native token and speaks for it towards the rollup.
///
/// Deposits pull real tokens into the bridge's own balance and send their base-unit value to the
/// [L2ECOBridge]. Withdrawals finalized by the rollup bridge convert the base amount back at the
/// current settlement-layer multiplier and release it from escrow. Rebases and upgrades of rollup
/// contracts originate here.
///
/// [L2ECOBridge]: crate::L2ECOBridge
#[derive(Debug)]
pub struct L1ECOBridge<M, T> {
    address: Address,
    messenger: M,
    token: T,
    proxy_admin: ProxyAdmin,
    config: Option<L1BridgeConfig>,
    events: Vec<BridgeEvent>,
}

impl<M, T> L1ECOBridge<M, T>
where
    M: CrossDomainMessenger,
    T: EscrowToken,
{
    /// Creates an uninitialized bridge at `address`, escrowing `token` and upgraded through
    /// `proxy_admin`.
    pub const fn new(address: Address, messenger: M, token: T, proxy_admin: ProxyAdmin) -> Self {
        Self { address, messenger, token, proxy_admin, config: None, events: Vec::new() }
    }

    /// One-time initializer.
    pub fn initialize(&mut self, ctx: CallContext, config: L1BridgeConfig) -> BridgeResult<()> {
        if self.config.is_some() {
            return Err(BridgeError::AlreadyInitialized);
        }
        self.config = Some(config);
        info!(
            target: "l1-bridge",
            "Initialized by {} with L2 bridge {}, L2 token {}, upgrader {}",
            ctx.sender, config.l2_bridge, config.l2_token, config.upgrader
        );
        Ok(())
    }

    /// Returns the configuration, failing if the bridge was never initialized.
    pub fn config(&self) -> BridgeResult<&L1BridgeConfig> {
        self.config.as_ref().ok_or(BridgeError::NotInitialized)
    }

    /// Returns the address of the bridge.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the escrowed token.
    pub const fn token(&self) -> &T {
        &self.token
    }

    /// Returns the escrowed token mutably.
    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    /// Returns the messenger.
    pub const fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Returns the messenger mutably.
    pub fn messenger_mut(&mut self) -> &mut M {
        &mut self.messenger
    }

    /// Returns the proxy admin the bridge upgrades itself through.
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

    /// Returns the current multiplier of the escrowed token.
    pub fn inflation_multiplier(&self) -> U256 {
        self.token.inflation_multiplier()
    }

    /// Returns the real balance held in escrow.
    pub fn escrow(&self) -> U256 {
        self.token.balance_of(self.address)
    }

    /// Deposits `amount` real tokens for the caller's own account on the rollup.
    pub fn deposit_erc20(
        &mut self,
        ctx: CallContext,
        l1_token: Address,
        l2_token: Address,
        amount: U256,
        l2_gas: u32,
        data: Bytes,
    ) -> BridgeResult<B256> {
        self.initiate_deposit(ctx, l1_token, l2_token, ctx.sender, amount, l2_gas, data)
    }

    /// Deposits `amount` real tokens for `to` on the rollup.
    #[allow(clippy::too_many_arguments)]
    pub fn deposit_erc20_to(
        &mut self,
        ctx: CallContext,
        l1_token: Address,
        l2_token: Address,
        to: Address,
        amount: U256,
        l2_gas: u32,
        data: Bytes,
    ) -> BridgeResult<B256> {
        self.initiate_deposit(ctx, l1_token, l2_token, to, amount, l2_gas, data)
    }

    #[allow(clippy::too_many_arguments)]
    fn initiate_deposit(
        &mut self,
        ctx: CallContext,
        l1_token: Address,
        l2_token: Address,
        to: Address,
        amount: U256,
        l2_gas: u32,
        data: Bytes,
    ) -> BridgeResult<B256> {
        let config = *self.config()?;
        if !ctx.is_eoa() {
            return Err(BridgeError::ContractCallerRejected(ctx.sender));
        }
        self.ensure_token_pair(&config, l1_token, l2_token)?;

        let base = to_base(amount, self.token.inflation_multiplier())?;
        debug!(target: "l1-bridge", "Depositing {amount} real as {base} base units");

        match self.token.transfer_from(self.address, ctx.sender, self.address, amount) {
            Ok(true) => {}
            Ok(false) => return Err(BridgeError::TransferFailed("transferFrom returned false".into())),
            Err(err) => return Err(BridgeError::TransferFailed(err.to_string())),
        }

        let call = IL2ECOBridge::finalizeDepositCall {
            l1Token: l1_token,
            l2Token: l2_token,
            from: ctx.sender,
            to,
            amount: base,
            data: data.clone(),
        };
        let hash =
            self.messenger.send_message(self.address, config.l2_bridge, call.abi_encode().into(), l2_gas);

        self.events.push(BridgeEvent::ERC20DepositInitiated {
            l1_token,
            l2_token,
            from: ctx.sender,
            to,
            amount,
            data,
        });
        info!(target: "l1-bridge", "Deposit of {amount} from {} to {to} initiated ({hash})", ctx.sender);
        Ok(hash)
    }

    /// Releases escrow for a withdrawal burned on the rollup. `amount` is in base units.
    ///
    /// Only callable by the messenger while it relays a message from the rollup bridge.
    #[allow(clippy::too_many_arguments)]
    pub fn finalize_erc20_withdrawal(
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
        ensure_from_peer(&self.messenger, &ctx, config.l2_bridge).inspect_err(|err| {
            warn!(target: "l1-bridge", "Rejected withdrawal finalization: {err}");
        })?;
        self.ensure_token_pair(&config, l1_token, l2_token)?;

        let real = to_real(amount, self.token.inflation_multiplier())?;
        match self.token.transfer(self.address, to, real) {
            Ok(true) => {}
            Ok(false) => return Err(BridgeError::TransferFailed("transfer returned false".into())),
            Err(err) => return Err(BridgeError::TransferFailed(err.to_string())),
        }

        self.events.push(BridgeEvent::ERC20WithdrawalFinalized {
            l1_token,
            l2_token,
            from,
            to,
            amount: real,
            data,
        });
        info!(target: "l1-bridge", "Withdrawal of {real} ({amount} base) from {from} to {to} finalized");
        Ok(())
    }

    /// Sends the token's current multiplier to the rollup bridge.
    pub fn rebase(&mut self, ctx: CallContext, l2_gas: u32) -> BridgeResult<B256> {
        let config = *self.config()?;
        let inflation_multiplier = self.token.inflation_multiplier();
        let call = IL2ECOBridge::rebaseCall { inflationMultiplier: inflation_multiplier };
        let hash =
            self.messenger.send_message(self.address, config.l2_bridge, call.abi_encode().into(), l2_gas);
        info!(
            target: "l1-bridge",
            "Rebase to {inflation_multiplier} sent by {} ({hash})", ctx.sender
        );
        Ok(hash)
    }

    /// Asks the rollup bridge to point the rollup token proxy at `implementation`.
    pub fn upgrade_eco(
        &mut self,
        ctx: CallContext,
        implementation: Address,
        l2_gas: u32,
    ) -> BridgeResult<B256> {
        let config = *self.config()?;
        Self::ensure_upgrader(&config, &ctx)?;
        let call = IL2ECOBridge::upgradeECOCall {
            implementation,
            blockNumber: U256::from(ctx.block_number),
        };
        let hash =
            self.messenger.send_message(self.address, config.l2_bridge, call.abi_encode().into(), l2_gas);
        info!(target: "l1-bridge", "Token upgrade to {implementation} sent ({hash})");
        Ok(hash)
    }

    /// Asks the rollup bridge to point its own proxy at `implementation`.
    pub fn upgrade_l2_bridge(
        &mut self,
        ctx: CallContext,
        implementation: Address,
        l2_gas: u32,
    ) -> BridgeResult<B256> {
        let config = *self.config()?;
        Self::ensure_upgrader(&config, &ctx)?;
        let call = IL2ECOBridge::upgradeSelfCall {
            implementation,
            blockNumber: U256::from(ctx.block_number),
        };
        let hash =
            self.messenger.send_message(self.address, config.l2_bridge, call.abi_encode().into(), l2_gas);
        info!(target: "l1-bridge", "L2 bridge upgrade to {implementation} sent ({hash})");
        Ok(hash)
    }

    /// Points this bridge's own proxy at `implementation`.
    pub fn upgrade_self(&mut self, ctx: CallContext, implementation: Address) -> BridgeResult<()> {
        let config = *self.config()?;
        Self::ensure_upgrader(&config, &ctx)?;
        if self.proxy_admin.owner() != self.address {
            return Err(BridgeError::NotOwner(self.proxy_admin.owner()));
        }
        self.proxy_admin.upgrade(self.address, self.address, implementation)?;
        self.events.push(BridgeEvent::UpgradeSelf { implementation });
        info!(target: "l1-bridge", "Upgraded to {implementation}");
        Ok(())
    }

    /// Decodes `calldata` and dispatches it to the matching channel-gated handler.
    pub fn relay(&mut self, ctx: CallContext, calldata: &[u8]) -> BridgeResult<()> {
        let call = IL1ECOBridge::IL1ECOBridgeCalls::abi_decode(calldata, true)
            .map_err(eco_messenger::MessageError::from)?;
        match call {
            IL1ECOBridge::IL1ECOBridgeCalls::finalizeERC20Withdrawal(call) => self
                .finalize_erc20_withdrawal(
                    ctx,
                    call.l1Token,
                    call.l2Token,
                    call.from,
                    call.to,
                    call.amount,
                    call.data,
                ),
        }
    }

    fn ensure_token_pair(
        &self,
        config: &L1BridgeConfig,
        l1_token: Address,
        l2_token: Address,
    ) -> BridgeResult<()> {
        if l1_token != self.token.token_address() {
            return Err(BridgeError::InvalidL1Address(l1_token));
        }
        if l2_token != config.l2_token {
            return Err(BridgeError::InvalidL2Address(l2_token));
        }
        Ok(())
    }

    fn ensure_upgrader(config: &L1BridgeConfig, ctx: &CallContext) -> BridgeResult<()> {
        if ctx.sender != config.upgrader {
            return Err(BridgeError::UnauthorizedUpgrader(ctx.sender));
        }
        Ok(())
    }
}
