//! The token interface a settlement-layer bridge escrows into.

use crate::{LedgerError, MintableLedger, RebasingLedger};
use alloy_primitives::{Address, U256};
use core::fmt::Display;
use eco_primitives::INITIAL_INFLATION_MULTIPLIER;

/// A token that a bridge can pull deposits from and release withdrawals out of.
///
/// Transfers report failure in two ways: by returning an error (a revert) or by returning
/// `Ok(false)`. Callers must treat both as a failed transfer.
pub trait EscrowToken {
    /// The error type for failed transfers.
    type Error: Display;

    /// Returns the address of the token.
    fn token_address(&self) -> Address;

    /// Returns the real balance of `account`.
    fn balance_of(&self, account: Address) -> U256;

    /// Returns the multiplier that relates the token's real and base units.
    fn inflation_multiplier(&self) -> U256;

    /// Moves `amount` real units from `caller` to `to`.
    fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> Result<bool, Self::Error>;

    /// Moves `amount` real units from `from` to `to` on behalf of `caller`.
    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, Self::Error>;
}

impl EscrowToken for RebasingLedger {
    type Error = LedgerError;

    fn token_address(&self) -> Address {
        self.address()
    }

    fn balance_of(&self, account: Address) -> U256 {
        Self::balance_of(self, account)
    }

    fn inflation_multiplier(&self) -> U256 {
        Self::inflation_multiplier(self)
    }

    fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> Result<bool, Self::Error> {
        Self::transfer(self, caller, to, amount)
    }

    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, Self::Error> {
        Self::transfer_from(self, caller, from, to, amount)
    }
}

impl EscrowToken for MintableLedger {
    type Error = LedgerError;

    fn token_address(&self) -> Address {
        self.address()
    }

    fn balance_of(&self, account: Address) -> U256 {
        Self::balance_of(self, account)
    }

    fn inflation_multiplier(&self) -> U256 {
        INITIAL_INFLATION_MULTIPLIER
    }

    fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> Result<bool, Self::Error> {
        Self::transfer(self, caller, to, amount)
    }

    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, Self::Error> {
        Self::transfer_from(self, caller, from, to, amount)
    }
}
