//! The arbitrage stake-split computation.

use surebet_core::{ArbitrageError, ArbitrageResult, Odds};

/// Split `investment` across the outcomes of one market so that the
/// payout is identical whichever outcome occurs.
///
/// Each outcome's implied probability is `1 / odds`; their sum is the
/// book margin. A margin below 1 means the bookmakers collectively
/// underpriced the event and a risk-free split exists:
///
/// ```text
/// stake_i = investment * p_i / margin
/// payout  = stake_i * odds_i = investment / margin   (for every i)
/// ```
///
/// A margin of 1 or more is the normal case (the bookmaker's built-in
/// edge) and yields an `exists: false` result, not an error.
///
/// Odds are valid by construction; the investment must be a finite
/// positive amount and the market needs at least two outcomes.
pub fn compute_arbitrage(
    odds: &[Odds],
    investment: f64,
) -> Result<ArbitrageResult, ArbitrageError> {
    if !investment.is_finite() || investment <= 0.0 {
        return Err(ArbitrageError::InvalidInvestment { value: investment });
    }
    if odds.len() < 2 {
        return Err(ArbitrageError::NotEnoughOutcomes(odds.len()));
    }

    let probabilities: Vec<f64> = odds.iter().map(|o| o.implied_probability()).collect();
    let margin: f64 = probabilities.iter().sum();

    if margin >= 1.0 {
        return Ok(ArbitrageResult::none(odds.len(), margin));
    }

    let stakes: Vec<f64> = probabilities
        .iter()
        .map(|p| investment * p / margin)
        .collect();
    let profit = investment / margin - investment;

    Ok(ArbitrageResult {
        exists: true,
        profit,
        stakes,
        total_investment: investment,
        margin,
    })
}

/// [`compute_arbitrage`] over raw odds values, validating each one
/// first. Used by the manual-calculator path where odds arrive as
/// user-typed numbers.
pub fn compute_from_raw(
    odds: &[f64],
    investment: f64,
) -> Result<ArbitrageResult, ArbitrageError> {
    let validated = odds
        .iter()
        .map(|&value| Odds::new(value))
        .collect::<Result<Vec<_>, _>>()?;
    compute_arbitrage(&validated, investment)
}

/// The dashboard's fixed three-way (home/draw/away) call. Stakes come
/// back in `Outcome::ALL` order.
pub fn compute_three_way(
    home: Odds,
    draw: Odds,
    away: Odds,
    investment: f64,
) -> Result<ArbitrageResult, ArbitrageError> {
    compute_arbitrage(&[home, draw, away], investment)
}
