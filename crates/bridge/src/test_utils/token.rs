//! An escrow token whose transfers can be made to fail.

use super::addresses::DEPLOYER;
use alloy_primitives::{Address, U256};
use eco_ledger::{EscrowToken, LedgerError, RebasingLedger};
use thiserror::Error;

/// How the next transfers of a [MockEscrowToken] fail.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TransferFailure {
    /// Transfers go through.
    #[default]
    None,
    /// Transfers revert.
    Revert,
    /// Transfers report `false` without moving funds.
    ReturnFalse,
}

/// Errors of the [MockEscrowToken].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MockTokenError {
    /// The transfer was set up to revert.
    #[error("Transfer reverted")]
    Reverted,
    /// The wrapped ledger rejected the transfer.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// A settlement-layer token backed by a [RebasingLedger] with [DEPLOYER] as its minter and
/// rebaser.
#[derive(Debug, Clone)]
pub struct MockEscrowToken {
    /// The backing ledger.
    pub ledger: RebasingLedger,
    /// The failure mode applied to every transfer.
    pub failure: TransferFailure,
}

impl MockEscrowToken {
    /// Deploys the token at `address`.
    pub fn new(address: Address) -> Self {
        let mut ledger = RebasingLedger::new(address);
        ledger.initialize(Address::ZERO, DEPLOYER, DEPLOYER).unwrap();
        Self { ledger, failure: TransferFailure::None }
    }

    /// Mints `amount` real tokens to `account`.
    pub fn fund(&mut self, account: Address, amount: U256) {
        self.ledger.mint(DEPLOYER, account, amount).unwrap();
    }

    /// Sets the inflation multiplier.
    pub fn rebase(&mut self, inflation_multiplier: U256) {
        self.ledger.rebase(DEPLOYER, inflation_multiplier).unwrap();
    }

    fn check_failure(&self) -> Result<bool, MockTokenError> {
        match self.failure {
            TransferFailure::None => Ok(true),
            TransferFailure::Revert => Err(MockTokenError::Reverted),
            TransferFailure::ReturnFalse => Ok(false),
        }
    }
}

impl EscrowToken for MockEscrowToken {
    type Error = MockTokenError;

    fn token_address(&self) -> Address {
        self.ledger.address()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.ledger.balance_of(account)
    }

    fn inflation_multiplier(&self) -> U256 {
        self.ledger.inflation_multiplier()
    }

    fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> Result<bool, Self::Error> {
        if !self.check_failure()? {
            return Ok(false);
        }
        Ok(self.ledger.transfer(caller, to, amount)?)
    }

    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, Self::Error> {
        if !self.check_failure()? {
            return Ok(false);
        }
        Ok(self.ledger.transfer_from(caller, from, to, amount)?)
    }
}
