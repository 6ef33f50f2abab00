//! Simulated fixture feed for running the dashboard without API keys.
//!
//! Generates a small slate of soccer fixtures whose prices drift each tick.
//! One fixture periodically crosses into arbitrage territory so the
//! dashboard has something to show.

use chrono::{Duration as ChronoDuration, Utc};
use compact_str::{format_compact, CompactString};

use surebet_core::{BookmakerQuote, Match, Odds};

const FIXTURES: &[(&str, &str)] = &[
    ("Arsenal", "Chelsea"),
    ("Real Madrid", "Barcelona"),
    ("Bayern Munich", "Borussia Dortmund"),
    ("Inter Milan", "Juventus"),
];

const BOOKMAKERS: &[(&str, &str)] = &[
    ("pinnacle", "Pinnacle"),
    ("betfair", "Betfair"),
    ("unibet", "Unibet"),
];

/// Build the demo slate for one tick. Odds wobble sinusoidally per
/// bookmaker; the first fixture's prices diverge enough across books that
/// the combined best odds dip under a 1.0 margin every few cycles.
pub fn demo_matches(tick: u64) -> Vec<Match> {
    let t = tick as f64;

    FIXTURES
        .iter()
        .enumerate()
        .map(|(idx, &(home_team, away_team))| {
            let commence = Utc::now() + ChronoDuration::hours(2 + idx as i64);
            // Fixture 0 swings wide so best-of-book margins cross 1.0.
            let spread = if idx == 0 { 0.35 } else { 0.08 };

            let quotes = BOOKMAKERS
                .iter()
                .enumerate()
                .map(|(book_idx, &(key, title))| {
                    let phase = t * 0.3 + book_idx as f64 * 2.1 + idx as f64 * 0.7;
                    let home = demo_odds(2.9, spread, phase);
                    let draw = demo_odds(3.4, spread, phase + 1.3);
                    let away = demo_odds(3.1, spread, phase + 2.6);
                    BookmakerQuote::new(key, title, home, draw, away)
                })
                .collect();

            Match {
                id: format_compact!("demo_{idx}"),
                sport_key: CompactString::const_new("soccer_demo"),
                sport_title: CompactString::const_new("Soccer (demo)"),
                commence_time: CompactString::from(commence.to_rfc3339()),
                home_team: CompactString::from(home_team),
                away_team: CompactString::from(away_team),
                quotes,
            }
        })
        .collect()
}

fn demo_odds(base: f64, spread: f64, phase: f64) -> Odds {
    let value = base + phase.sin() * spread;
    // Base prices stay well above 1.0 for any spread used here.
    Odds::new(value.max(Odds::MIN)).unwrap_or_else(|_| Odds::new(base).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generates_full_slate_with_quotes() {
        let matches = demo_matches(0);
        assert_eq!(matches.len(), FIXTURES.len());
        for event in &matches {
            assert_eq!(event.quotes.len(), BOOKMAKERS.len());
        }
    }

    #[test]
    fn ids_are_stable_across_ticks() {
        let first = demo_matches(1);
        let later = demo_matches(42);
        assert_eq!(first[0].id, later[0].id);
        assert_ne!(first[0].quotes[0].home, later[0].quotes[0].home);
    }

    #[test]
    fn wide_fixture_eventually_offers_arbitrage() {
        let found = (0..100).any(|tick| {
            let matches = demo_matches(tick);
            surebet_core::BestOdds::from_quotes(&matches[0].quotes)
                .map(|best| {
                    best.as_array()
                        .iter()
                        .map(|o| o.implied_probability())
                        .sum::<f64>()
                        < 1.0
                })
                .unwrap_or(false)
        });
        assert!(found, "demo slate never produced an arbitrage");
    }
}
