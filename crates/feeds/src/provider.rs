//! Provider seam for odds REST clients.

use crate::FeedError;
use async_trait::async_trait;
use surebet_core::Match;

/// An external odds source the poller can fan out to.
///
/// Implementations own their HTTP client and credentials and return
/// already-normalized matches; per-provider failures stay behind this
/// seam so the poller can aggregate best-effort.
#[async_trait]
pub trait OddsProvider: Send + Sync {
    /// Stable provider name for logging and match-id prefixes.
    fn name(&self) -> &'static str;

    /// Fetch the current match list with normalized bookmaker quotes.
    async fn fetch_matches(&self) -> Result<Vec<Match>, FeedError>;
}
