//! Duplicate-fixture merging across providers.

use compact_str::CompactString;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use surebet_core::Match;

/// Collapse matches reported by more than one provider into one entry
/// per fixture, keyed by (home team, away team).
///
/// The first occurrence wins the identity fields; bookmaker quotes
/// from later duplicates are folded in so best-odds selection sees
/// every provider's prices. A bookmaker already present is not added
/// twice.
pub fn dedup_matches(matches: Vec<Match>) -> Vec<Match> {
    let mut merged: Vec<Match> = Vec::with_capacity(matches.len());
    let mut index: HashMap<(CompactString, CompactString), usize> = HashMap::new();

    for event in matches {
        match index.entry(event.dedup_key()) {
            Entry::Vacant(slot) => {
                slot.insert(merged.len());
                merged.push(event);
            }
            Entry::Occupied(slot) => {
                let existing = &mut merged[*slot.get()];
                for quote in event.quotes {
                    let seen = existing
                        .quotes
                        .iter()
                        .any(|q| q.bookmaker == quote.bookmaker);
                    if !seen {
                        existing.quotes.push(quote);
                    }
                }
            }
        }
    }

    merged
}
