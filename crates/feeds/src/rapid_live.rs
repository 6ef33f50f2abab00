//! RapidAPI live-odds client (in-play matches).
//!
//! Polls the live-odds endpoint for in-play soccer events. Despite the
//! name this is a periodic re-fetch like every other provider here.

use crate::{quotes_from_raw, FeedError, OddsProvider, RawBookmaker};
use async_trait::async_trait;
use compact_str::{format_compact, CompactString};
use serde::Deserialize;
use std::time::Duration;
use surebet_core::Match;

const BASE_URL: &str = "https://live-odds.p.rapidapi.com/v1";
const API_HOST: &str = "live-odds.p.rapidapi.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct LiveResponse {
    #[serde(default)]
    events: Vec<LiveEvent>,
}

#[derive(Debug, Deserialize)]
struct LiveEvent {
    event_id: String,
    start_time: String,
    home_team: String,
    away_team: String,
    #[serde(default)]
    bookmakers: Vec<RawBookmaker>,
}

impl LiveEvent {
    fn normalize(self) -> Match {
        let quotes = quotes_from_raw(&self.bookmakers, &self.home_team, &self.away_team);
        Match {
            id: format_compact!("rapid_{}", self.event_id),
            sport_key: CompactString::new("soccer"),
            sport_title: CompactString::new("Soccer"),
            commence_time: CompactString::new(&self.start_time),
            home_team: CompactString::new(&self.home_team),
            away_team: CompactString::new(&self.away_team),
            quotes,
        }
    }
}

/// REST client for the RapidAPI live-odds gateway.
pub struct RapidLiveOdds {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl RapidLiveOdds {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

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
        let raw: LiveResponse = serde_json::from_str(body)?;
        Ok(raw.events.into_iter().map(LiveEvent::normalize).collect())
    }
}

#[async_trait]
impl OddsProvider for RapidLiveOdds {
    fn name(&self) -> &'static str {
        "rapid-live-odds"
    }

    async fn fetch_matches(&self) -> Result<Vec<Match>, FeedError> {
        let url = format!("{}/events/live", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", API_HOST)
            .query(&[("sport", "soccer"), ("region", "eu")])
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

    const SAMPLE: &str = r#"{
        "events": [
            {
                "event_id": "182331",
                "start_time": "2026-08-29T18:45:00Z",
                "home_team": "Lyon",
                "away_team": "Marseille",
                "bookmakers": [
                    {
                        "key": "1xbet",
                        "title": "1xBet",
                        "markets": [
                            {
                                "key": "h2h",
                                "outcomes": [
                                    {"name": "Lyon", "price": 3.05},
                                    {"name": "Draw", "price": 3.5},
                                    {"name": "Marseille", "price": 3.1}
                                ]
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_live_response() {
        let matches = RapidLiveOdds::parse_response(SAMPLE).unwrap();
        assert_eq!(matches.len(), 1);

        let event = &matches[0];
        assert_eq!(event.id, "rapid_182331");
        assert_eq!(event.sport_key, "soccer");
        assert_eq!(event.home_team, "Lyon");
        assert_eq!(event.quotes.len(), 1);
        assert_eq!(event.quotes[0].title, "1xBet");
        assert_eq!(event.quotes[0].draw.value(), 3.5);
    }

    #[test]
    fn test_parse_empty_events() {
        let matches = RapidLiveOdds::parse_response("{}").unwrap();
        assert!(matches.is_empty());
    }
}
