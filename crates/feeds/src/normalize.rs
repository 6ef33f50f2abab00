//! Provider wire types and bookmaker-quote normalization.
//!
//! Both providers deliver the same bookmaker/market/outcome shape.
//! Normalization turns it into complete [`BookmakerQuote`]s: a
//! bookmaker missing an outcome price, or quoting below 1.0, is
//! dropped here instead of carrying a zero into the margin math.

use serde::Deserialize;
use surebet_core::{BookmakerQuote, Odds};
use tracing::debug;

/// Bookmakers excluded from analysis regardless of their prices.
pub const BLACKLISTED_BOOKMAKERS: &[&str] = &["suprabets"];

/// Market key for the three-way match-odds market.
pub const H2H_MARKET: &str = "h2h";

/// Outcome name used by providers for the draw.
pub const DRAW_OUTCOME: &str = "Draw";

#[derive(Debug, Clone, Deserialize)]
pub struct RawBookmaker {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub markets: Vec<RawMarket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMarket {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<RawOutcome>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOutcome {
    pub name: String,
    pub price: f64,
}

impl RawMarket {
    fn price_for(&self, name: &str) -> Option<f64> {
        self.outcomes.iter().find(|o| o.name == name).map(|o| o.price)
    }
}

/// Normalize one match's bookmaker list into complete three-way quotes.
///
/// Outcome prices are matched by team name and the literal "Draw"
/// label, the way The Odds API keys its h2h outcomes.
pub fn quotes_from_raw(
    bookmakers: &[RawBookmaker],
    home_team: &str,
    away_team: &str,
) -> Vec<BookmakerQuote> {
    let mut quotes = Vec::with_capacity(bookmakers.len());

    for bookmaker in bookmakers {
        if BLACKLISTED_BOOKMAKERS.contains(&bookmaker.key.to_lowercase().as_str()) {
            debug!(bookmaker = %bookmaker.key, "blacklisted, skipping");
            continue;
        }

        let Some(market) = bookmaker.markets.iter().find(|m| m.key == H2H_MARKET) else {
            debug!(bookmaker = %bookmaker.key, "no h2h market, skipping");
            continue;
        };

        let prices = (
            market.price_for(home_team),
            market.price_for(DRAW_OUTCOME),
            market.price_for(away_team),
        );
        let (Some(home), Some(draw), Some(away)) = prices else {
            debug!(bookmaker = %bookmaker.key, "incomplete outcome set, skipping");
            continue;
        };

        match (Odds::new(home), Odds::new(draw), Odds::new(away)) {
            (Ok(home), Ok(draw), Ok(away)) => {
                quotes.push(BookmakerQuote::new(
                    &bookmaker.key,
                    &bookmaker.title,
                    home,
                    draw,
                    away,
                ));
            }
            _ => {
                debug!(
                    bookmaker = %bookmaker.key,
                    home, draw, away,
                    "out-of-range price, skipping"
                );
            }
        }
    }

    quotes
}
