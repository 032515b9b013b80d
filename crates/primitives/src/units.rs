//! Conversions between base and real token units.
//!
//! A rebasing ledger stores every balance in *base* units and derives the user-facing *real*
//! balance from the current inflation multiplier:
//!
//! ```text
//! real = base * multiplier / 1e18
//! base = real * 1e18 / multiplier
//! ```
//!
//! Both directions round down. Repeated conversions may therefore leave sub-unit dust with the
//! account that is converting, never with the counterparty.

use crate::ErrorKind;
use alloy_primitives::U256;
use thiserror::Error;

/// The fixed-point scale of the inflation multiplier (18 decimals).
pub const INFLATION_MULTIPLIER_SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// The multiplier every ledger starts at, `1.0`.
pub const INITIAL_INFLATION_MULTIPLIER: U256 = INFLATION_MULTIPLIER_SCALE;

/// A [Result] type alias where the error is [UnitsError].
pub type UnitsResult<T> = Result<T, UnitsError>;

/// An error raised while converting between base and real units.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitsError {
    /// The inflation multiplier is zero, so real units cannot be expressed in base units.
    #[error("Inflation multiplier is zero")]
    ZeroMultiplier,
    /// The intermediate product does not fit in 256 bits.
    #[error("Unit conversion overflowed: {0} * {1}")]
    Overflow(U256, U256),
}

impl UnitsError {
    /// Returns the [ErrorKind] of the error.
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidAmount
    }
}

/// Converts a real amount into base units at the given multiplier, rounding down.
pub fn to_base(real: U256, multiplier: U256) -> UnitsResult<U256> {
    if multiplier.is_zero() {
        return Err(UnitsError::ZeroMultiplier);
    }
    real.checked_mul(INFLATION_MULTIPLIER_SCALE)
        .map(|scaled| scaled / multiplier)
        .ok_or(UnitsError::Overflow(real, INFLATION_MULTIPLIER_SCALE))
}

/// Converts a base amount into real units at the given multiplier, rounding down.
pub fn to_real(base: U256, multiplier: U256) -> UnitsResult<U256> {
    base.checked_mul(multiplier)
        .map(|scaled| scaled / INFLATION_MULTIPLIER_SCALE)
        .ok_or(UnitsError::Overflow(base, multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{prelude::any, proptest};

    const HALF: U256 = U256::from_limbs([500_000_000_000_000_000, 0, 0, 0]);

    #[test]
    fn test_identity_at_initial_multiplier() {
        let amount = U256::from(1_000);
        assert_eq!(to_base(amount, INITIAL_INFLATION_MULTIPLIER).unwrap(), amount);
        assert_eq!(to_real(amount, INITIAL_INFLATION_MULTIPLIER).unwrap(), amount);
    }

    #[test]
    fn test_half_multiplier_halves_real_value() {
        let base = U256::from(1_000);
        assert_eq!(to_real(base, HALF).unwrap(), U256::from(500));
        assert_eq!(to_base(U256::from(500), HALF).unwrap(), base);
    }

    #[test]
    fn test_to_base_rounds_down() {
        // 1 real unit at a multiplier of 3.0 is a third of a base unit.
        let three = INFLATION_MULTIPLIER_SCALE * U256::from(3);
        assert_eq!(to_base(U256::from(1), three).unwrap(), U256::ZERO);
        assert_eq!(to_base(U256::from(7), three).unwrap(), U256::from(2));
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        assert_eq!(to_base(U256::from(1), U256::ZERO), Err(UnitsError::ZeroMultiplier));
        assert_eq!(to_real(U256::from(1), U256::ZERO).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_overflow_reported() {
        assert!(matches!(
            to_base(U256::MAX, INITIAL_INFLATION_MULTIPLIER),
            Err(UnitsError::Overflow(_, _))
        ));
        assert!(matches!(to_real(U256::MAX, U256::from(2)), Err(UnitsError::Overflow(_, _))));
    }

    proptest! {
        #[test]
        fn test_round_trip_never_creates_value(real in any::<u64>(), multiplier in 1..u64::MAX) {
            let real = U256::from(real);
            let multiplier = U256::from(multiplier);
            let back = to_real(to_base(real, multiplier).unwrap(), multiplier).unwrap();
            assert!(back <= real);

            // The dust lost to rounding is bounded by one base unit's worth of real value.
            let max_dust = (multiplier + INFLATION_MULTIPLIER_SCALE - U256::from(1)) /
                INFLATION_MULTIPLIER_SCALE;
            assert!(real - back <= max_dust);
        }
    }
}
