//! Non-negative price type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    /// The value is below zero.
    #[error("price must be non-negative")]
    Negative,
    /// The value is NaN or infinite.
    #[error("price must be a finite number")]
    NotFinite,
}

/// A non-negative amount in the store's currency.
///
/// Prices travel as plain JSON numbers on the wire and as doubles in the
/// store, so this wraps `f64` rather than a decimal type; the wrapper only
/// guarantees the value is finite and not below zero.
///
/// ## Examples
///
/// ```
/// use orchard_core::Price;
///
/// assert!(Price::parse(49.99).is_ok());
/// assert!(Price::parse(0.0).is_ok());
/// assert!(Price::parse(-1.0).is_err());
/// assert!(Price::parse(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Parse a `Price` from a raw number.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative, NaN or infinite.
    pub fn parse(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite);
        }
        if value < 0.0 {
            return Err(PriceError::Negative);
        }
        Ok(Self(value))
    }

    /// Get the raw amount.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!((Price::parse(49.99).unwrap().get() - 49.99).abs() < f64::EPSILON);
        assert!(Price::parse(0.0).unwrap().get().abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(Price::parse(-0.01), Err(PriceError::Negative));
        assert_eq!(Price::parse(-100.0), Err(PriceError::Negative));
    }

    #[test]
    fn test_parse_not_finite() {
        assert_eq!(Price::parse(f64::NAN), Err(PriceError::NotFinite));
        assert_eq!(Price::parse(f64::INFINITY), Err(PriceError::NotFinite));
        assert_eq!(Price::parse(f64::NEG_INFINITY), Err(PriceError::NotFinite));
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::parse(49.9).unwrap().to_string(), "49.90");
        assert_eq!(Price::parse(0.0).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::parse(12.5).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "12.5");
    }
}
