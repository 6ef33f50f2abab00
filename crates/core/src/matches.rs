//! Sports match (fixture) carrying normalized bookmaker quotes.

use crate::BookmakerQuote;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A scheduled or in-play match with the bookmaker quotes collected for it.
///
/// `commence_time` stays an ISO-8601 string as delivered by the odds
/// providers; the dashboard formats it client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Provider-scoped identifier (e.g., "rapid_182331").
    pub id: CompactString,
    /// Sport key (e.g., "soccer_epl").
    pub sport_key: CompactString,
    /// Sport display title (e.g., "Premier League").
    pub sport_title: CompactString,
    /// Kickoff time, ISO-8601.
    pub commence_time: CompactString,
    pub home_team: CompactString,
    pub away_team: CompactString,
    /// Normalized three-way quotes, one per bookmaker.
    pub quotes: Vec<BookmakerQuote>,
}

impl Match {
    /// Key used to recognize the same fixture across providers.
    pub fn dedup_key(&self) -> (CompactString, CompactString) {
        (self.home_team.clone(), self.away_team.clone())
    }

    /// Whether any bookmaker priced this match.
    #[inline]
    pub fn has_quotes(&self) -> bool {
        !self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Odds;
    use pretty_assertions::assert_eq;

    fn sample_match(id: &str) -> Match {
        Match {
            id: CompactString::new(id),
            sport_key: CompactString::new("soccer"),
            sport_title: CompactString::new("Soccer"),
            commence_time: CompactString::new("2026-08-30T15:00:00Z"),
            home_team: CompactString::new("Arsenal"),
            away_team: CompactString::new("Chelsea"),
            quotes: vec![BookmakerQuote::new(
                "pinnacle",
                "Pinnacle",
                Odds::new(2.1).unwrap(),
                Odds::new(3.4).unwrap(),
                Odds::new(3.2).unwrap(),
            )],
        }
    }

    #[test]
    fn test_dedup_key_ignores_provider_id() {
        let a = sample_match("oddsapi_1");
        let b = sample_match("rapid_99");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_match_serde_roundtrip() {
        let m = sample_match("oddsapi_1");
        let json = serde_json::to_string(&m).unwrap();
        let back: Match = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
