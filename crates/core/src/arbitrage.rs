//! Arbitrage computation result record.

use crate::Outcome;
use serde::{Deserialize, Serialize};

/// Result of one arbitrage computation over an odds set.
///
/// Derived deterministically from exactly one (odds set, investment)
/// pair; computed fresh on every invocation, never mutated, never
/// persisted. Stakes are ordered the same way as the input odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageResult {
    /// Whether a risk-free stake split exists (margin < 1).
    pub exists: bool,
    /// Guaranteed profit when `exists`, otherwise 0.
    pub profit: f64,
    /// Per-outcome stakes in input order; all zero when `exists` is false.
    pub stakes: Vec<f64>,
    /// Sum of stakes when `exists`, otherwise 0.
    pub total_investment: f64,
    /// Sum of implied probabilities across the outcomes.
    pub margin: f64,
}

impl ArbitrageResult {
    /// The "no opportunity" result for an `n`-outcome market. This is
    /// the expected common case (bookmaker overhead), not an error.
    pub fn none(n_outcomes: usize, margin: f64) -> Self {
        Self {
            exists: false,
            profit: 0.0,
            stakes: vec![0.0; n_outcomes],
            total_investment: 0.0,
            margin,
        }
    }

    /// Payout received regardless of outcome when the opportunity exists.
    #[inline]
    pub fn expected_return(&self) -> f64 {
        self.total_investment + self.profit
    }

    /// Profit as a percentage of investment; 0 when no opportunity.
    pub fn roi_pct(&self) -> f64 {
        if self.exists && self.total_investment > 0.0 {
            self.profit / self.total_investment * 100.0
        } else {
            0.0
        }
    }

    /// Stake for a three-way outcome. Only meaningful when the result
    /// was computed over odds in `Outcome::ALL` order.
    #[inline]
    pub fn stake(&self, outcome: Outcome) -> f64 {
        self.stakes.get(outcome.index()).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_none_result_is_all_zero() {
        let result = ArbitrageResult::none(3, 1.05);
        assert!(!result.exists);
        assert_eq!(result.profit, 0.0);
        assert_eq!(result.stakes, vec![0.0, 0.0, 0.0]);
        assert_eq!(result.total_investment, 0.0);
        assert_eq!(result.roi_pct(), 0.0);
    }

    #[test]
    fn test_three_way_stake_accessor() {
        let result = ArbitrageResult {
            exists: true,
            profit: 50.0,
            stakes: vec![400.0, 350.0, 250.0],
            total_investment: 1000.0,
            margin: 0.95,
        };
        assert_eq!(result.stake(Outcome::Home), 400.0);
        assert_eq!(result.stake(Outcome::Draw), 350.0);
        assert_eq!(result.stake(Outcome::Away), 250.0);
        assert_eq!(result.expected_return(), 1050.0);
        assert_eq!(result.roi_pct(), 5.0);
    }
}
