//! Input-validation errors for the arbitrage computation.

use thiserror::Error;

/// Errors returned when the arbitrage inputs are not usable.
///
/// Both kinds are local validation failures meant to surface as form
/// messages; neither is fatal to the hosting process. "No arbitrage"
/// is a normal result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ArbitrageError {
    /// An odds value was non-finite or below 1.0. Decimal odds below 1
    /// are not a valid quote (implied probability would exceed 1).
    #[error("invalid odds {value}: decimal odds must be a finite number >= 1")]
    InvalidOdds { value: f64 },

    /// The investment amount was non-finite, zero, or negative.
    #[error("invalid investment {value}: must be a finite positive amount")]
    InvalidInvestment { value: f64 },

    /// A market needs at least two mutually exclusive outcomes.
    #[error("a market needs at least 2 outcomes, got {0}")]
    NotEnoughOutcomes(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_value() {
        let err = ArbitrageError::InvalidOdds { value: 0.5 };
        assert!(err.to_string().contains("0.5"));

        let err = ArbitrageError::InvalidInvestment { value: -10.0 };
        assert!(err.to_string().contains("-10"));

        let err = ArbitrageError::NotEnoughOutcomes(1);
        assert!(err.to_string().contains("got 1"));
    }
}
