use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::warn;

use surebet_engine::{find_opportunities, MatchAnalysis, ProfitSummary};
use surebet_feeds::MatchBoard;

use crate::config::AppConfig;

/// Counters the stats reporter and the `/ws` stats message read from.
pub struct BoardStats {
    polls_completed: AtomicU64,
    matches_tracked: AtomicU64,
    opportunities_found: AtomicU64,
    started_at_ms: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub polls_completed: u64,
    pub matches_tracked: u64,
    pub opportunities_found: u64,
    pub uptime_secs: u64,
}

impl BoardStats {
    fn new() -> Self {
        Self {
            polls_completed: AtomicU64::new(0),
            matches_tracked: AtomicU64::new(0),
            opportunities_found: AtomicU64::new(0),
            started_at_ms: AtomicU64::new(now_ms()),
        }
    }

    /// Records one completed poll cycle. `matches` is the current board
    /// size, `opportunities` the number surfaced this cycle.
    pub fn record_poll(&self, matches: u64, opportunities: u64) {
        self.polls_completed.fetch_add(1, Ordering::Relaxed);
        self.matches_tracked.store(matches, Ordering::Relaxed);
        self.opportunities_found
            .fetch_add(opportunities, Ordering::Relaxed);
    }

    pub fn uptime_secs(&self) -> u64 {
        let started = self.started_at_ms.load(Ordering::Relaxed);
        now_ms().saturating_sub(started) / 1000
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            polls_completed: self.polls_completed.load(Ordering::Relaxed),
            matches_tracked: self.matches_tracked.load(Ordering::Relaxed),
            opportunities_found: self.opportunities_found.load(Ordering::Relaxed),
            uptime_secs: self.uptime_secs(),
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Shared server state. The board is fed by the poller, the analyses are
/// refreshed after every poll, and handlers only ever read.
pub struct AppState {
    pub config: RwLock<AppConfig>,
    pub board: MatchBoard,
    pub opportunities: RwLock<Vec<MatchAnalysis>>,
    pub summary: RwLock<ProfitSummary>,
    pub stats: BoardStats,
    running: AtomicBool,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: RwLock::new(config),
            board: MatchBoard::new(),
            opportunities: RwLock::new(Vec::new()),
            summary: RwLock::new(ProfitSummary::default()),
            stats: BoardStats::new(),
            running: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::Relaxed);
    }

    pub fn shutdown(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub async fn default_investment(&self) -> f64 {
        self.config.read().await.analysis.default_investment
    }

    /// Re-runs arbitrage analysis over the current board and stores the
    /// surfaced opportunities and their summary. Returns how many were found.
    pub async fn refresh_analyses(&self) -> usize {
        let (investment, min_profit) = {
            let config = self.config.read().await;
            (
                config.analysis.default_investment,
                config.analysis.min_profit,
            )
        };
        let matches = self.board.all();
        let mut analyses = match find_opportunities(&matches, investment) {
            Ok(analyses) => analyses,
            Err(e) => {
                // Config is sanitized at load, so this only fires if the
                // investment was mutated into something invalid at runtime.
                warn!(error = %e, "analysis failed, keeping previous opportunities");
                return 0;
            }
        };
        analyses.retain(|a| a.result.profit >= min_profit);
        let count = analyses.len();
        let summary = ProfitSummary::from_analyses(&analyses);
        *self.opportunities.write().await = analyses;
        *self.summary.write().await = summary;
        count
    }
}

pub fn create_state(config: AppConfig) -> SharedState {
    Arc::new(AppState::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;
    use pretty_assertions::assert_eq;
    use surebet_core::{BookmakerQuote, Match, Odds};

    fn arb_match() -> Match {
        Match {
            id: CompactString::from("m1"),
            sport_key: CompactString::from("soccer"),
            sport_title: CompactString::from("Soccer"),
            commence_time: CompactString::from("2026-09-01T18:00:00Z"),
            home_team: CompactString::from("Arsenal"),
            away_team: CompactString::from("Chelsea"),
            quotes: vec![BookmakerQuote::new(
                "pinnacle",
                "Pinnacle",
                Odds::new(3.0).unwrap(),
                Odds::new(3.5).unwrap(),
                Odds::new(3.0).unwrap(),
            )],
        }
    }

    #[tokio::test]
    async fn refresh_surfaces_arbitrage_from_board() {
        let state = AppState::new(AppConfig::default());
        state.board.replace_all(vec![arb_match()]);

        let count = state.refresh_analyses().await;
        assert_eq!(count, 1);

        let opportunities = state.opportunities.read().await;
        assert!(opportunities[0].result.exists);
        let summary = state.summary.read().await;
        assert_eq!(summary.opportunities, 1);
        assert!(summary.total_profit > 0.0);
    }

    #[tokio::test]
    async fn refresh_respects_min_profit_floor() {
        let mut config = AppConfig::default();
        config.analysis.min_profit = 1_000_000.0;
        let state = AppState::new(config);
        state.board.replace_all(vec![arb_match()]);

        let count = state.refresh_analyses().await;
        assert_eq!(count, 0);
        assert!(state.opportunities.read().await.is_empty());
    }

    #[test]
    fn stats_accumulate_across_polls() {
        let stats = BoardStats::new();
        stats.record_poll(10, 2);
        stats.record_poll(8, 1);
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.polls_completed, 2);
        assert_eq!(snapshot.matches_tracked, 8);
        assert_eq!(snapshot.opportunities_found, 3);
    }
}
