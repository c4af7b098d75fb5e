//! Decimal amount as delivered by the API.

use serde::{Deserialize, Serialize};

/// A monetary amount encoded as a decimal string (e.g. `"12500.00"`).
///
/// The raw string is kept so it can be displayed exactly as received.
/// Arithmetic goes through [`Amount::value`], which parses into `f64`:
/// totals are floating-point and may drift from an exact decimal sum for
/// very large collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    /// Wraps a raw decimal string.
    #[inline]
    #[must_use]
    pub fn new<T: Into<String>>(raw: T) -> Self {
        Self(raw.into())
    }

    /// Returns the amount exactly as received.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the amount, or `None` if the string is not a finite number.
    #[inline]
    #[must_use]
    pub fn try_value(&self) -> Option<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Parses the amount for aggregation.
    ///
    /// Malformed amounts count as `0.0` (with a warning) so that a single
    /// bad record cannot turn a total into NaN.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.try_value().unwrap_or_else(|| {
            tracing::warn!(amount = %self.0, "unparseable amount treated as zero");
            0.0
        })
    }
}

impl core::fmt::Display for Amount {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Amount {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_strings() {
        assert!((Amount::from("1000").value() - 1000.0).abs() < f64::EPSILON);
        assert!((Amount::from("12.50").value() - 12.5).abs() < f64::EPSILON);
        assert!((Amount::from(" 7 ").value() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_amount_is_zero() {
        assert_eq!(Amount::from("abc").try_value(), None);
        assert!(Amount::from("abc").value().abs() < f64::EPSILON);
        assert_eq!(Amount::from("NaN").try_value(), None);
        assert_eq!(Amount::from("").try_value(), None);
    }

    #[test]
    fn keeps_raw_text() {
        let amount = Amount::new("1500.00");
        assert_eq!(amount.as_str(), "1500.00");
        assert_eq!(amount.to_string(), "1500.00");
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, r#""1500.00""#);
    }
}
