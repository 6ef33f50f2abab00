//! Manual calculator: user-entered odds, planned stakes.

use crate::compute_from_raw;
use serde::{Deserialize, Serialize};
use surebet_core::ArbitrageError;

/// One leg of a planned bet: the entered odds and the stake/payout the
/// plan assigns to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakePlanLeg {
    pub odds: f64,
    pub stake: f64,
    pub payout: f64,
}

/// Outcome of the manual calculator for an N-leg market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakePlan {
    pub is_arbitrage: bool,
    /// Book margin as a percentage: `(Σ 1/odds − 1) · 100`.
    /// Negative exactly when an arbitrage exists.
    pub margin_pct: f64,
    pub total_stake: f64,
    /// Payout received regardless of outcome; 0 when no arbitrage.
    pub total_payout: f64,
    pub profit: f64,
    pub roi_pct: f64,
    pub legs: Vec<StakePlanLeg>,
}

/// Distribute `total_stake` across N user-entered odds.
///
/// Invalid odds or stake fail fast with the validation error; a book
/// that simply has no edge to exploit comes back as a zeroed plan with
/// `is_arbitrage: false`, which the dashboard renders as "no
/// opportunity" rather than a failure.
pub fn plan_stakes(odds: &[f64], total_stake: f64) -> Result<StakePlan, ArbitrageError> {
    let result = compute_from_raw(odds, total_stake)?;
    let margin_pct = (result.margin - 1.0) * 100.0;

    if !result.exists {
        return Ok(StakePlan {
            is_arbitrage: false,
            margin_pct,
            // The entered stake is echoed back so the form keeps its value.
            total_stake,
            total_payout: 0.0,
            profit: 0.0,
            roi_pct: 0.0,
            legs: odds
                .iter()
                .map(|&o| StakePlanLeg {
                    odds: o,
                    stake: 0.0,
                    payout: 0.0,
                })
                .collect(),
        });
    }

    let legs: Vec<StakePlanLeg> = odds
        .iter()
        .zip(&result.stakes)
        .map(|(&o, &stake)| StakePlanLeg {
            odds: o,
            stake,
            payout: stake * o,
        })
        .collect();

    let total_payout = result.expected_return();
    let profit = result.profit;

    Ok(StakePlan {
        is_arbitrage: true,
        margin_pct,
        total_stake: result.total_investment,
        total_payout,
        profit,
        roi_pct: result.roi_pct(),
        legs,
    })
}
