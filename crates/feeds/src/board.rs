//! Latest-snapshot store for polled matches.

use compact_str::CompactString;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use surebet_core::Match;

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

/// Thread-safe store holding the most recent poll's matches.
///
/// Cheap to clone and share; each poll replaces the whole snapshot,
/// so readers never see a half-updated mix of old and new fixtures
/// beyond the brief window of the swap itself.
#[derive(Debug, Clone, Default)]
pub struct MatchBoard {
    matches: Arc<DashMap<CompactString, Match>>,
    updated_at_ms: Arc<AtomicU64>,
}

impl MatchBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot with a fresh one.
    pub fn replace_all(&self, snapshot: Vec<Match>) {
        self.matches.clear();
        for event in snapshot {
            self.matches.insert(event.id.clone(), event);
        }
        self.updated_at_ms.store(now_ms(), Ordering::Relaxed);
    }

    /// All stored matches, ordered by kickoff time then id for a
    /// stable dashboard listing.
    pub fn all(&self) -> Vec<Match> {
        let mut matches: Vec<Match> = self.matches.iter().map(|r| r.value().clone()).collect();
        matches.sort_by(|a, b| {
            a.commence_time
                .cmp(&b.commence_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        matches
    }

    pub fn get(&self, id: &str) -> Option<Match> {
        self.matches.get(id).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Millisecond timestamp of the last snapshot swap; 0 before the
    /// first poll completes.
    pub fn updated_at_ms(&self) -> u64 {
        self.updated_at_ms.load(Ordering::Relaxed)
    }

    /// True when no poll has landed within `max_age_ms`.
    pub fn is_stale(&self, max_age_ms: u64) -> bool {
        let updated = self.updated_at_ms();
        if updated == 0 {
            return true;
        }
        now_ms().saturating_sub(updated) > max_age_ms
    }
}
