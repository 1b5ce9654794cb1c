//! Display rounding.
//!
//! Values snap to the nearest multiple of the configured increment, then to
//! two decimal places. Both steps round half to even.

use num_traits::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::{Error, Result};

/// Snap `value` to the nearest multiple of `round_to`.
///
/// A non-positive or non-finite increment, or a non-finite value, leaves the
/// value unchanged.
pub fn round_to_increment(value: f64, round_to: f64) -> f64 {
    if !value.is_finite() || !round_to.is_finite() || round_to <= 0.0 {
        return value;
    }
    (value / round_to).round_ties_even() * round_to
}

/// `value` snapped to `round_to`, as a two-place decimal.
pub fn round_for_display(value: f64, round_to: f64) -> Result<Decimal> {
    let stepped = round_to_increment(value, round_to);
    let decimal = Decimal::from_f64(stepped).ok_or_else(|| {
        Error::Calculation(format!("{} cannot be represented as a decimal", value))
    })?;

    if round_to.is_finite() && round_to > 0.0 {
        Ok(decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
    } else {
        Ok(decimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rounds_to_increment_then_two_places() {
        assert_eq!(round_for_display(60468.48113, 0.1).unwrap(), dec!(60468.50));
        assert_eq!(round_for_display(58707.26323, 0.1).unwrap(), dec!(58707.3));
        assert_eq!(round_for_display(53370.2393, 1.0).unwrap(), dec!(53370));
        assert_eq!(round_for_display(53374.9, 10.0).unwrap(), dec!(53370));
    }

    #[test]
    fn test_half_goes_to_even() {
        assert_eq!(round_to_increment(2.5, 1.0), 2.0);
        assert_eq!(round_to_increment(3.5, 1.0), 4.0);
    }

    #[test]
    fn test_non_positive_increment_leaves_value() {
        assert_eq!(round_to_increment(123.456, 0.0), 123.456);
        assert_eq!(round_to_increment(123.456, -5.0), 123.456);
        assert_eq!(round_for_display(123.456, 0.0).unwrap(), dec!(123.456));
    }

    #[test]
    fn test_non_finite_value_is_unchanged_but_not_displayable() {
        assert!(round_to_increment(f64::INFINITY, 0.1).is_infinite());
        assert!(round_to_increment(f64::NAN, 0.1).is_nan());
        assert!(matches!(
            round_for_display(f64::NAN, 0.1),
            Err(Error::Calculation(_))
        ));
    }
}
