//! Decimal odds with validated construction.

use crate::ArbitrageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decimal odds value: the payout multiplier per unit stake.
///
/// Invariant: finite and >= 1.0. Odds of exactly 1.0 are a valid
/// (if pointless) quote with implied probability 1. Anything below 1
/// or non-finite is rejected at construction, so downstream arithmetic
/// never divides by zero or propagates NaN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Odds(f64);

impl Odds {
    /// Minimum valid decimal odds.
    pub const MIN: f64 = 1.0;

    /// Validate and wrap a raw odds value.
    pub fn new(value: f64) -> Result<Self, ArbitrageError> {
        if value.is_finite() && value >= Self::MIN {
            Ok(Self(value))
        } else {
            Err(ArbitrageError::InvalidOdds { value })
        }
    }

    /// The raw decimal multiplier.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Implied probability of the outcome if the market were fair:
    /// `1 / odds`, always in (0, 1].
    #[inline]
    pub fn implied_probability(self) -> f64 {
        1.0 / self.0
    }
}

impl TryFrom<f64> for Odds {
    type Error = ArbitrageError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Odds> for f64 {
    fn from(odds: Odds) -> f64 {
        odds.0
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
