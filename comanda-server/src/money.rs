//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done in `Decimal`, then converted to `f64` (rounded to
//! 2 decimal places, half away from zero) for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price (1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed payment / movement amount (1,000,000)
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal (non-finite values become zero)
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Exact sum of f64 amounts
pub fn sum<I: IntoIterator<Item = f64>>(values: I) -> Decimal {
    values.into_iter().map(to_decimal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_has_no_float_drift() {
        let total = sum([0.1, 0.2, 0.3]);
        assert_eq!(to_f64(total), 0.6);
    }

    #[test]
    fn test_to_f64_rounds_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(12345, 3)), 12.35);
        assert_eq!(to_f64(Decimal::new(-12345, 3)), -12.35);
    }

    #[test]
    fn test_non_finite_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }
}
