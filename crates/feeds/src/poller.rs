//! Best-effort fan-out over all configured odds providers.

use crate::{dedup_matches, MatchBoard, OddsProvider};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Polls every configured provider and swaps the merged result into
/// the shared board. One [`OddsPoller::fetch_once`] per tick; the
/// server owns the interval loop.
pub struct OddsPoller {
    providers: Vec<Arc<dyn OddsProvider>>,
    board: MatchBoard,
}

impl OddsPoller {
    pub fn new(board: MatchBoard) -> Self {
        Self {
            providers: Vec::new(),
            board,
        }
    }

    pub fn add_provider(&mut self, provider: Arc<dyn OddsProvider>) {
        self.providers.push(provider);
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub fn board(&self) -> &MatchBoard {
        &self.board
    }

    /// Fetch from all providers concurrently, tolerating per-provider
    /// failure: a provider that errors is logged and skipped, and the
    /// snapshot is built from whichever providers answered.
    ///
    /// Returns the number of fixtures in the new snapshot.
    pub async fn fetch_once(&self) -> usize {
        let fetches = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            async move { (provider.name(), provider.fetch_matches().await) }
        });

        let mut collected = Vec::new();
        for (name, result) in join_all(fetches).await {
            match result {
                Ok(matches) => {
                    debug!(provider = name, matches = matches.len(), "fetched");
                    collected.extend(matches);
                }
                Err(err) => {
                    warn!(
                        provider = name,
                        error = %err,
                        transient = err.is_transient(),
                        "provider fetch failed, skipping"
                    );
                }
            }
        }

        let merged = dedup_matches(collected);
        let count = merged.len();
        self.board.replace_all(merged);
        count
    }
}
