//! Three-way market outcomes and per-bookmaker price sets.

use crate::Odds;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Outcome of a three-way (1X2) soccer market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Outcome {
    Home = 0,
    Draw = 1,
    Away = 2,
}

impl Outcome {
    /// All outcomes in stake-vector order.
    pub const ALL: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];

    /// Position in an ordered stake vector.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Home => "home",
            Outcome::Draw => "draw",
            Outcome::Away => "away",
        }
    }
}

/// One bookmaker's complete three-way price set for a match.
///
/// Complete by construction: quotes with a missing or sub-1.0 outcome
/// price are dropped during feed normalization instead of carrying a
/// silent zero into the margin arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmakerQuote {
    /// Stable bookmaker key (e.g., "pinnacle").
    pub bookmaker: CompactString,
    /// Display name (e.g., "Pinnacle").
    pub title: CompactString,
    pub home: Odds,
    pub draw: Odds,
    pub away: Odds,
}

impl BookmakerQuote {
    pub fn new(bookmaker: &str, title: &str, home: Odds, draw: Odds, away: Odds) -> Self {
        Self {
            bookmaker: CompactString::new(bookmaker),
            title: CompactString::new(title),
            home,
            draw,
            away,
        }
    }

    /// Price for one outcome.
    #[inline]
    pub fn odds(&self, outcome: Outcome) -> Odds {
        match outcome {
            Outcome::Home => self.home,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away,
        }
    }

    /// Book margin of this single quote: sum of implied probabilities.
    /// Above 1.0 for any bookmaker with an edge.
    pub fn margin(&self) -> f64 {
        Outcome::ALL
            .iter()
            .map(|&o| self.odds(o).implied_probability())
            .sum()
    }
}

/// Best available price per outcome across a match's bookmakers,
/// remembering which bookmaker supplied each price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestOdds {
    pub home: Odds,
    pub draw: Odds,
    pub away: Odds,
    pub home_bookmaker: CompactString,
    pub draw_bookmaker: CompactString,
    pub away_bookmaker: CompactString,
}

impl BestOdds {
    /// Pick the highest price per outcome. `None` when there are no quotes.
    pub fn from_quotes(quotes: &[BookmakerQuote]) -> Option<Self> {
        let first = quotes.first()?;
        let mut best = BestOdds {
            home: first.home,
            draw: first.draw,
            away: first.away,
            home_bookmaker: first.title.clone(),
            draw_bookmaker: first.title.clone(),
            away_bookmaker: first.title.clone(),
        };

        for quote in &quotes[1..] {
            if quote.home > best.home {
                best.home = quote.home;
                best.home_bookmaker = quote.title.clone();
            }
            if quote.draw > best.draw {
                best.draw = quote.draw;
                best.draw_bookmaker = quote.title.clone();
            }
            if quote.away > best.away {
                best.away = quote.away;
                best.away_bookmaker = quote.title.clone();
            }
        }

        Some(best)
    }

    #[inline]
    pub fn odds(&self, outcome: Outcome) -> Odds {
        match outcome {
            Outcome::Home => self.home,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away,
        }
    }

    #[inline]
    pub fn bookmaker(&self, outcome: Outcome) -> &CompactString {
        match outcome {
            Outcome::Home => &self.home_bookmaker,
            Outcome::Draw => &self.draw_bookmaker,
            Outcome::Away => &self.away_bookmaker,
        }
    }

    /// Prices in stake-vector order.
    pub fn as_array(&self) -> [Odds; 3] {
        [self.home, self.draw, self.away]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quote(title: &str, home: f64, draw: f64, away: f64) -> BookmakerQuote {
        BookmakerQuote::new(
            &title.to_lowercase(),
            title,
            Odds::new(home).unwrap(),
            Odds::new(draw).unwrap(),
            Odds::new(away).unwrap(),
        )
    }

    #[test]
    fn test_outcome_indices_are_stable() {
        assert_eq!(Outcome::Home.index(), 0);
        assert_eq!(Outcome::Draw.index(), 1);
        assert_eq!(Outcome::Away.index(), 2);
        assert_eq!(Outcome::ALL.len(), 3);
    }

    #[test]
    fn test_quote_margin_reflects_bookmaker_edge() {
        // 1/1.5 + 1/4.0 + 1/6.0 = 1.0833... - the usual overround book
        let q = quote("Bet365", 1.5, 4.0, 6.0);
        assert!(q.margin() > 1.0);

        // 1/3 + 1/3.5 + 1/3 = 0.952... - an underpriced book
        let q = quote("Pinnacle", 3.0, 3.5, 3.0);
        assert!(q.margin() < 1.0);
    }

    #[test]
    fn test_best_odds_selects_max_per_outcome() {
        let quotes = vec![
            quote("Bet365", 2.1, 3.4, 3.2),
            quote("Pinnacle", 2.3, 3.3, 3.1),
            quote("Unibet", 2.0, 3.6, 3.5),
        ];

        let best = BestOdds::from_quotes(&quotes).unwrap();
        assert_eq!(best.home.value(), 2.3);
        assert_eq!(best.home_bookmaker, "Pinnacle");
        assert_eq!(best.draw.value(), 3.6);
        assert_eq!(best.draw_bookmaker, "Unibet");
        assert_eq!(best.away.value(), 3.5);
        assert_eq!(best.away_bookmaker, "Unibet");
    }

    #[test]
    fn test_best_odds_empty_quotes() {
        assert_eq!(BestOdds::from_quotes(&[]), None);
    }

    #[test]
    fn test_best_odds_single_quote() {
        let quotes = vec![quote("Bet365", 2.1, 3.4, 3.2)];
        let best = BestOdds::from_quotes(&quotes).unwrap();
        assert_eq!(best.as_array().map(Odds::value), [2.1, 3.4, 3.2]);
        assert_eq!(best.draw_bookmaker, "Bet365");
    }
}
