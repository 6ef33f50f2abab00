//! Per-match analysis: best-odds selection and opportunity ranking.

use crate::compute_three_way;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use surebet_core::{ArbitrageError, ArbitrageResult, BestOdds, Match};
use tracing::debug;

/// One match analyzed against the best price per outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub event: Match,
    /// Highest odds per outcome across the match's bookmakers.
    pub best_odds: BestOdds,
    pub result: ArbitrageResult,
}

/// Analyze a single match at the given investment.
///
/// Returns `Ok(None)` for matches no bookmaker priced; normalization
/// upstream already dropped incomplete quotes, so any surviving match
/// either analyzes cleanly or has nothing to analyze.
pub fn analyze_match(
    event: &Match,
    investment: f64,
) -> Result<Option<MatchAnalysis>, ArbitrageError> {
    let Some(best_odds) = BestOdds::from_quotes(&event.quotes) else {
        debug!(match_id = %event.id, "no bookmaker quotes, skipping");
        return Ok(None);
    };

    let result = compute_three_way(best_odds.home, best_odds.draw, best_odds.away, investment)?;

    Ok(Some(MatchAnalysis {
        event: event.clone(),
        best_odds,
        result,
    }))
}

/// Analyze a snapshot of matches, keep only those where an arbitrage
/// exists, and sort by guaranteed profit descending.
pub fn find_opportunities(
    matches: &[Match],
    investment: f64,
) -> Result<Vec<MatchAnalysis>, ArbitrageError> {
    // Checked up front: an empty or unpriced snapshot never reaches the
    // stake computation, and a bad investment must still fail fast.
    if !investment.is_finite() || investment <= 0.0 {
        return Err(ArbitrageError::InvalidInvestment { value: investment });
    }

    let mut opportunities = Vec::new();

    for event in matches {
        if let Some(analysis) = analyze_match(event, investment)? {
            if analysis.result.exists {
                opportunities.push(analysis);
            }
        }
    }

    opportunities.sort_by(|a, b| {
        b.result
            .profit
            .partial_cmp(&a.result.profit)
            .unwrap_or(Ordering::Equal)
    });

    Ok(opportunities)
}

/// Aggregate view over a set of surviving opportunities, shown in the
/// dashboard's summary panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitSummary {
    pub total_profit: f64,
    pub total_investment: f64,
    pub opportunities: usize,
    pub best_roi_pct: f64,
}

impl ProfitSummary {
    pub fn from_analyses(analyses: &[MatchAnalysis]) -> Self {
        let mut summary = ProfitSummary::default();
        for analysis in analyses {
            summary.total_profit += analysis.result.profit;
            summary.total_investment += analysis.result.total_investment;
            summary.opportunities += 1;
            summary.best_roi_pct = summary.best_roi_pct.max(analysis.result.roi_pct());
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;
    use pretty_assertions::assert_eq;
    use surebet_core::{BookmakerQuote, Odds};

    fn quote(title: &str, home: f64, draw: f64, away: f64) -> BookmakerQuote {
        BookmakerQuote::new(
            &title.to_lowercase(),
            title,
            Odds::new(home).unwrap(),
            Odds::new(draw).unwrap(),
            Odds::new(away).unwrap(),
        )
    }

    fn fixture(id: &str, home: &str, away: &str, quotes: Vec<BookmakerQuote>) -> Match {
        Match {
            id: CompactString::new(id),
            sport_key: CompactString::new("soccer"),
            sport_title: CompactString::new("Soccer"),
            commence_time: CompactString::new("2026-08-30T15:00:00Z"),
            home_team: CompactString::new(home),
            away_team: CompactString::new(away),
            quotes,
        }
    }

    #[test]
    fn test_analyzes_best_odds_across_bookmakers() {
        // Neither book alone is under 1, but the best of both is:
        // 1/3.0 + 1/3.6 + 1/3.1 = 0.9337
        let event = fixture(
            "m1",
            "Arsenal",
            "Chelsea",
            vec![
                quote("Bet365", 3.0, 3.2, 2.8),
                quote("Pinnacle", 2.7, 3.6, 3.1),
            ],
        );

        let analysis = analyze_match(&event, 1000.0).unwrap().unwrap();
        assert_eq!(analysis.best_odds.home.value(), 3.0);
        assert_eq!(analysis.best_odds.draw.value(), 3.6);
        assert_eq!(analysis.best_odds.away.value(), 3.1);
        assert!(analysis.result.exists);
        assert!(analysis.result.profit > 0.0);
    }

    #[test]
    fn test_unpriced_match_is_skipped() {
        let event = fixture("m1", "Arsenal", "Chelsea", vec![]);
        assert_eq!(analyze_match(&event, 1000.0).unwrap(), None);
    }

    #[test]
    fn test_invalid_investment_propagates() {
        let event = fixture(
            "m1",
            "Arsenal",
            "Chelsea",
            vec![quote("Bet365", 3.0, 3.5, 3.0)],
        );
        let err = analyze_match(&event, -5.0).unwrap_err();
        assert!(matches!(err, ArbitrageError::InvalidInvestment { .. }));
    }

    #[test]
    fn test_opportunities_sorted_by_profit_desc() {
        let matches = vec![
            // Small edge: margin 0.9902
            fixture("small", "A", "B", vec![quote("X", 3.03, 3.03, 3.03)]),
            // No edge at all
            fixture("none", "C", "D", vec![quote("X", 1.5, 2.0, 2.0)]),
            // Big edge: margin 0.9524
            fixture("big", "E", "F", vec![quote("X", 3.0, 3.5, 3.0)]),
        ];

        let opportunities = find_opportunities(&matches, 1000.0).unwrap();
        let ids: Vec<&str> = opportunities.iter().map(|a| a.event.id.as_str()).collect();
        assert_eq!(ids, vec!["big", "small"]);
    }

    #[test]
    fn test_profit_summary() {
        let matches = vec![
            fixture("a", "A", "B", vec![quote("X", 3.03, 3.03, 3.03)]),
            fixture("b", "C", "D", vec![quote("X", 3.0, 3.5, 3.0)]),
        ];
        let opportunities = find_opportunities(&matches, 1000.0).unwrap();
        let summary = ProfitSummary::from_analyses(&opportunities);

        assert_eq!(summary.opportunities, 2);
        assert_eq!(summary.total_investment, 2000.0);
        let expected_profit: f64 = opportunities.iter().map(|a| a.result.profit).sum();
        assert!((summary.total_profit - expected_profit).abs() < 1e-9);
        assert!(summary.best_roi_pct > 0.0);
    }

    #[test]
    fn test_empty_snapshot() {
        let opportunities = find_opportunities(&[], 1000.0).unwrap();
        assert!(opportunities.is_empty());
        assert_eq!(ProfitSummary::from_analyses(&opportunities), ProfitSummary::default());
    }

    #[test]
    fn test_invalid_investment_rejected_even_with_nothing_to_analyze() {
        // The investment check must not depend on a priced match reaching
        // the stake computation: empty and unpriced snapshots still reject.
        for investment in [-5.0, 0.0, f64::NAN, f64::INFINITY] {
            let err = find_opportunities(&[], investment).unwrap_err();
            assert!(matches!(err, ArbitrageError::InvalidInvestment { .. }));
        }

        let unpriced = vec![fixture("m1", "Arsenal", "Chelsea", vec![])];
        let err = find_opportunities(&unpriced, -5.0).unwrap_err();
        assert!(matches!(err, ArbitrageError::InvalidInvestment { .. }));
    }
}
