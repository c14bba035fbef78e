//! Type-safe money representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;

/// An amount of money in a specific currency.
///
/// Amounts are held as [`Decimal`] in the currency's standard unit (dollars,
/// not cents) so conversion arithmetic never goes through floating point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 style currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }
}

impl fmt::Display for Money {
    /// Format for display with two decimal places (e.g., `19.99 EUR`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_display_pads_to_two_decimals() {
        let eur = CurrencyCode::parse("EUR").expect("valid code");
        assert_eq!(Money::new(dec!(8.5), eur.clone()).to_string(), "8.50 EUR");
        assert_eq!(Money::new(dec!(20), eur).to_string(), "20.00 EUR");
    }
}
