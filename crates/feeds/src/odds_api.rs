//! The Odds API client (upcoming matches).
//!
//! <https://the-odds-api.com/> v4: one call returns upcoming matches
//! across sports with per-bookmaker h2h prices in decimal odds.

use crate::{quotes_from_raw, FeedError, OddsProvider, RawBookmaker};
use async_trait::async_trait;
use compact_str::{format_compact, CompactString};
use serde::Deserialize;
use std::time::Duration;
use surebet_core::Match;

const BASE_URL: &str = "https://api.the-odds-api.com/v4/sports";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upcoming-odds wire format, one entry per match.
#[derive(Debug, Deserialize)]
struct ApiMatch {
    id: String,
    sport_key: String,
    sport_title: String,
    commence_time: String,
    home_team: String,
    away_team: String,
    #[serde(default)]
    bookmakers: Vec<RawBookmaker>,
}

impl ApiMatch {
    fn normalize(self) -> Match {
        let quotes = quotes_from_raw(&self.bookmakers, &self.home_team, &self.away_team);
        Match {
            id: format_compact!("oddsapi_{}", self.id),
            sport_key: CompactString::new(&self.sport_key),
            sport_title: CompactString::new(&self.sport_title),
            commence_time: CompactString::new(&self.commence_time),
            home_team: CompactString::new(&self.home_team),
            away_team: CompactString::new(&self.away_team),
            quotes,
        }
    }
}

/// REST client for The Odds API.
pub struct TheOddsApi {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TheOddsApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Override the endpoint, used by tests against a local server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn parse_response(body: &str) -> Result<Vec<Match>, FeedError> {
        let raw: Vec<ApiMatch> = serde_json::from_str(body)?;
        Ok(raw.into_iter().map(ApiMatch::normalize).collect())
    }
}

#[async_trait]
impl OddsProvider for TheOddsApi {
    fn name(&self) -> &'static str {
        "the-odds-api"
    }

    async fn fetch_matches(&self) -> Result<Vec<Match>, FeedError> {
        let url = format!("{}/upcoming/odds", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("regions", "eu"),
                ("markets", "h2h"),
                ("oddsFormat", "decimal"),
                ("dateFormat", "iso"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::from_status(status.as_u16()));
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"[
        {
            "id": "bda33adca828c09dc3cac3a856aef176",
            "sport_key": "soccer_epl",
            "sport_title": "Premier League",
            "commence_time": "2026-08-30T15:00:00Z",
            "home_team": "Arsenal",
            "away_team": "Chelsea",
            "bookmakers": [
                {
                    "key": "pinnacle",
                    "title": "Pinnacle",
                    "markets": [
                        {
                            "key": "h2h",
                            "outcomes": [
                                {"name": "Arsenal", "price": 2.1},
                                {"name": "Chelsea", "price": 3.2},
                                {"name": "Draw", "price": 3.4}
                            ]
                        }
                    ]
                },
                {
                    "key": "suprabets",
                    "title": "Suprabets",
                    "markets": [
                        {
                            "key": "h2h",
                            "outcomes": [
                                {"name": "Arsenal", "price": 2.5},
                                {"name": "Chelsea", "price": 3.5},
                                {"name": "Draw", "price": 3.8}
                            ]
                        }
                    ]
                }
            ]
        },
        {
            "id": "deadbeef",
            "sport_key": "soccer_uefa_champs_league",
            "sport_title": "UEFA Champions League",
            "commence_time": "2026-08-31T19:00:00Z",
            "home_team": "Real Madrid",
            "away_team": "Bayern Munich",
            "bookmakers": []
        }
    ]"#;

    #[test]
    fn test_parse_upcoming_response() {
        let matches = TheOddsApi::parse_response(SAMPLE).unwrap();
        assert_eq!(matches.len(), 2);

        let first = &matches[0];
        assert_eq!(first.id, "oddsapi_bda33adca828c09dc3cac3a856aef176");
        assert_eq!(first.sport_key, "soccer_epl");
        assert_eq!(first.home_team, "Arsenal");
        assert_eq!(first.away_team, "Chelsea");

        // Blacklisted bookmaker dropped during normalization.
        assert_eq!(first.quotes.len(), 1);
        assert_eq!(first.quotes[0].bookmaker, "pinnacle");
        assert_eq!(first.quotes[0].home.value(), 2.1);
        assert_eq!(first.quotes[0].draw.value(), 3.4);
        assert_eq!(first.quotes[0].away.value(), 3.2);

        // A match with no bookmakers still parses; it just has no quotes.
        assert!(!matches[1].has_quotes());
    }

    #[test]
    fn test_parse_rejects_non_array_payload() {
        let err = TheOddsApi::parse_response(r#"{"message": "quota exceeded"}"#).unwrap_err();
        assert!(matches!(err, FeedError::ParseError(_)));
    }
}
