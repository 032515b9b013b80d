//! A fixed-supply companion ledger without rebasing.

use crate::{Allowances, LedgerError, LedgerEvent, LedgerResult, Role, TokenRoles};
use alloc::vec::Vec;
use alloy_primitives::{Address, U256};
use eco_primitives::UnitsError;
use hashbrown::HashMap;
use tracing::{debug, info};

/// A plain token ledger whose supply only changes through role-gated mints and burns.
///
/// Balances are stored as-is; there is no multiplier.
#[derive(Debug, Clone)]
pub struct MintableLedger {
    address: Address,
    l1_token: Address,
    initialized: bool,
    balances: HashMap<Address, U256>,
    total_supply: U256,
    allowances: Allowances,
    roles: TokenRoles,
    events: Vec<LedgerEvent>,
}

impl MintableLedger {
    /// Creates an uninitialized ledger at `address`.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            l1_token: Address::ZERO,
            initialized: false,
            balances: HashMap::new(),
            total_supply: U256::ZERO,
            allowances: Allowances::default(),
            roles: TokenRoles::default(),
            events: Vec::new(),
        }
    }

    /// One-time initializer. `bridge` becomes a minter and a burner.
    pub fn initialize(
        &mut self,
        l1_token: Address,
        bridge: Address,
        role_admin: Address,
    ) -> LedgerResult<()> {
        if self.initialized {
            return Err(LedgerError::AlreadyInitialized);
        }
        if role_admin.is_zero() {
            return Err(LedgerError::ZeroRoleAdmin);
        }
        self.initialized = true;
        self.l1_token = l1_token;
        self.roles = TokenRoles::new(role_admin);
        if !bridge.is_zero() {
            self.roles.grant(bridge, &[Role::Minter, Role::Burner]);
        }
        info!(target: "ledger", "Initialized mintable ledger {}", self.address);
        Ok(())
    }

    /// Returns the address the ledger is deployed at.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the settlement-layer token this ledger mirrors.
    pub const fn l1_token(&self) -> Address {
        self.l1_token
    }

    /// Returns the role sets.
    pub const fn roles(&self) -> &TokenRoles {
        &self.roles
    }

    /// Returns the balance of `account`.
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Returns the total supply.
    pub const fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Returns the remaining allowance of `spender` over `owner`'s tokens.
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(owner, spender)
    }

    /// Returns every event emitted so far.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Mints `amount` to `account`.
    pub fn mint(&mut self, caller: Address, account: Address, amount: U256) -> LedgerResult<()> {
        if !self.roles.has(Role::Minter, caller) {
            return Err(LedgerError::UnauthorizedMinter(caller));
        }
        if account.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let total = self
            .total_supply
            .checked_add(amount)
            .ok_or(UnitsError::Overflow(self.total_supply, amount))?;
        self.total_supply = total;
        *self.balances.entry(account).or_default() += amount;
        self.events.push(LedgerEvent::Transfer { from: Address::ZERO, to: account, value: amount });
        debug!(target: "ledger", "Minted {amount} to {account} on {}", self.address);
        Ok(())
    }

    /// Burns `amount` from `account`. Allowed for burners and for `account` itself.
    pub fn burn(&mut self, caller: Address, account: Address, amount: U256) -> LedgerResult<()> {
        if caller != account && !self.roles.has(Role::Burner, caller) {
            return Err(LedgerError::UnauthorizedBurner(caller));
        }
        self.ensure_balance(account, amount)?;
        self.debit(account, amount);
        self.total_supply -= amount;
        self.events.push(LedgerEvent::Transfer { from: account, to: Address::ZERO, value: amount });
        Ok(())
    }

    /// Moves `amount` from `caller` to `to`.
    pub fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> LedgerResult<bool> {
        self.ensure_transfer(caller, to, amount)?;
        self.move_balance(caller, to, amount);
        Ok(true)
    }

    /// Allows `spender` to move up to `amount` out of `caller`'s balance.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> LedgerResult<bool> {
        self.allowances.approve(caller, spender, amount);
        self.events.push(LedgerEvent::Approval { owner: caller, spender, value: amount });
        Ok(true)
    }

    /// Moves `amount` from `from` to `to`, spending `caller`'s allowance.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> LedgerResult<bool> {
        self.allowances.ensure(from, caller, amount)?;
        self.ensure_transfer(from, to, amount)?;
        self.allowances.spend(from, caller, amount);
        self.move_balance(from, to, amount);
        Ok(true)
    }

    /// Adds or removes a minter.
    pub fn update_minters(&mut self, caller: Address, account: Address, allowed: bool) -> LedgerResult<()> {
        let event = self.roles.update(caller, Role::Minter, account, allowed)?;
        self.events.push(event);
        Ok(())
    }

    /// Adds or removes a burner.
    pub fn update_burners(&mut self, caller: Address, account: Address, allowed: bool) -> LedgerResult<()> {
        let event = self.roles.update(caller, Role::Burner, account, allowed)?;
        self.events.push(event);
        Ok(())
    }

    /// Hands the role admin over to `new_admin`.
    pub fn update_role_admin(&mut self, caller: Address, new_admin: Address) -> LedgerResult<()> {
        let event = self.roles.update_role_admin(caller, new_admin)?;
        self.events.push(event);
        Ok(())
    }

    fn ensure_balance(&self, account: Address, amount: U256) -> LedgerResult<()> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance { available, required: amount });
        }
        Ok(())
    }

    fn ensure_transfer(&self, from: Address, to: Address, amount: U256) -> LedgerResult<()> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.ensure_balance(from, amount)
    }

    fn debit(&mut self, account: Address, amount: U256) {
        let remaining = self.balance_of(account).saturating_sub(amount);
        if remaining.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, remaining);
        }
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) {
        self.debit(from, amount);
        let credited = self.balance_of(to).saturating_add(amount);
        self.balances.insert(to, credited);
        self.events.push(LedgerEvent::Transfer { from, to, value: amount });
    }
}
