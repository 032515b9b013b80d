//! The upgrade controller for proxied contracts.

use crate::{ProxyError, ProxyResult};
use alloy_primitives::Address;
use hashbrown::HashMap;
use tracing::info;

/// Owns a set of proxies and decides which implementation each one runs.
///
/// Only the owner may register or upgrade a proxy. A bridge that upgrades contracts on request of
/// the other domain must first be made the owner; until then its upgrade handlers fail.
#[derive(Debug, Clone)]
pub struct ProxyAdmin {
    address: Address,
    owner: Address,
    implementations: HashMap<Address, Address>,
}

impl ProxyAdmin {
    /// Creates a proxy admin at `address` owned by `owner`.
    pub fn new(address: Address, owner: Address) -> Self {
        Self { address, owner, implementations: HashMap::new() }
    }

    /// Returns the address of the proxy admin.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the current owner.
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Returns the implementation behind `proxy`, if it is registered.
    pub fn implementation(&self, proxy: Address) -> Option<Address> {
        self.implementations.get(&proxy).copied()
    }

    /// Hands ownership to `new_owner`.
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> ProxyResult<()> {
        self.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(ProxyError::ZeroAddress);
        }
        self.owner = new_owner;
        info!(target: "proxy-admin", "Ownership of {} transferred to {new_owner}", self.address);
        Ok(())
    }

    /// Registers `proxy` with its first implementation.
    pub fn deploy_proxy(
        &mut self,
        caller: Address,
        proxy: Address,
        implementation: Address,
    ) -> ProxyResult<()> {
        self.ensure_owner(caller)?;
        self.implementations.insert(proxy, implementation);
        Ok(())
    }

    /// Points `proxy` at `implementation`.
    pub fn upgrade(
        &mut self,
        caller: Address,
        proxy: Address,
        implementation: Address,
    ) -> ProxyResult<()> {
        self.ensure_owner(caller)?;
        let slot =
            self.implementations.get_mut(&proxy).ok_or(ProxyError::UnknownProxy(proxy))?;
        *slot = implementation;
        info!(target: "proxy-admin", "Proxy {proxy} upgraded to {implementation}");
        Ok(())
    }

    fn ensure_owner(&self, caller: Address) -> ProxyResult<()> {
        if caller != self.owner {
            return Err(ProxyError::NotOwner(caller));
        }
        Ok(())
    }
}
