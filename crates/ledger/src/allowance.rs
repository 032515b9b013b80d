//! ERC-20 style spending allowances.

use crate::{LedgerError, LedgerResult};
use alloy_primitives::{Address, U256};
use hashbrown::HashMap;

/// Allowances keyed by `(owner, spender)`, in real units.
///
/// An allowance of [U256::MAX] is treated as infinite and is never decremented.
#[derive(Debug, Clone, Default)]
pub struct Allowances(HashMap<(Address, Address), U256>);

impl Allowances {
    /// Returns how much `spender` may still move out of `owner`'s balance.
    pub fn get(&self, owner: Address, spender: Address) -> U256 {
        self.0.get(&(owner, spender)).copied().unwrap_or_default()
    }

    /// Sets the allowance, replacing any previous value.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) {
        self.0.insert((owner, spender), amount);
    }

    /// Fails if the allowance does not cover `amount`. Does not modify state.
    pub fn ensure(&self, owner: Address, spender: Address, amount: U256) -> LedgerResult<()> {
        let available = self.get(owner, spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance { available, required: amount });
        }
        Ok(())
    }

    /// Consumes `amount` of the allowance. Must be preceded by [Self::ensure].
    pub fn spend(&mut self, owner: Address, spender: Address, amount: U256) {
        let available = self.get(owner, spender);
        if available != U256::MAX {
            self.0.insert((owner, spender), available.saturating_sub(amount));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const OWNER: Address = address!("1111111111111111111111111111111111111111");
    const SPENDER: Address = address!("2222222222222222222222222222222222222222");

    #[test]
    fn test_spend_decrements() {
        let mut allowances = Allowances::default();
        allowances.approve(OWNER, SPENDER, U256::from(100));
        allowances.ensure(OWNER, SPENDER, U256::from(60)).unwrap();
        allowances.spend(OWNER, SPENDER, U256::from(60));
        assert_eq!(allowances.get(OWNER, SPENDER), U256::from(40));
        assert_eq!(
            allowances.ensure(OWNER, SPENDER, U256::from(41)),
            Err(LedgerError::InsufficientAllowance {
                available: U256::from(40),
                required: U256::from(41)
            })
        );
    }

    #[test]
    fn test_infinite_allowance_is_not_decremented() {
        let mut allowances = Allowances::default();
        allowances.approve(OWNER, SPENDER, U256::MAX);
        allowances.spend(OWNER, SPENDER, U256::from(1_000));
        assert_eq!(allowances.get(OWNER, SPENDER), U256::MAX);
    }
}
