//! Exact decimal prices.
//!
//! Prices are kept as [`Decimal`] so that cart totals add up to the cent.
//! The storefront only sells in one currency, so a price is just an amount.

use core::fmt;
use core::iter::Sum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative-by-convention amount of money in the store currency.
///
/// Deserializes from a JSON number or string (`19.99` or `"19.99"`).
/// Displays as dollars with two decimal places (`$19.99`, `-$5.00`).
///
/// Arithmetic saturates at the bounds of [`Decimal`] instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// This price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Sum of two prices.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}${:.2}", self.0.abs().round_dp(2))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::from_cents(500).to_string(), "$5.00");
        assert_eq!(Price::from_cents(1999).to_string(), "$19.99");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_display_negative_puts_sign_first() {
        assert_eq!(Price::from_cents(-500).to_string(), "-$5.00");
        assert!(Price::from_cents(-1).is_negative());
        assert!(!Price::ZERO.is_negative());
    }

    #[test]
    fn test_times_saturates_instead_of_overflowing() {
        let max = Price::new(Decimal::MAX);
        assert_eq!(max.times(2), max);
        assert_eq!(Price::new(Decimal::MIN).times(3), Price::new(Decimal::MIN));
    }

    #[test]
    fn test_sum_saturates_instead_of_overflowing() {
        let total: Price = [Price::new(Decimal::MAX), Price::from_cents(100)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(Decimal::MAX));
    }

    #[test]
    fn test_times() {
        assert_eq!(Price::from_cents(250).times(3), Price::from_cents(750));
        assert_eq!(Price::from_cents(250).times(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(110), Price::from_cents(220)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(330));
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: Price = serde_json::from_str("19.99").unwrap();
        let from_string: Price = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(from_number, Price::from_cents(1999));
        assert_eq!(from_string, Price::from_cents(1999));
    }

    #[test]
    fn test_decimal_addition_is_exact() {
        let total: Price = [Price::from_cents(10), Price::from_cents(20)]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), Decimal::new(30, 2));
    }
}
