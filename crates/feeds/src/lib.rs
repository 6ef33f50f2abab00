//! Odds collection from external betting providers.
//!
//! This crate fetches match odds over REST, normalizes the provider
//! payloads into [`surebet_core::Match`] values, and keeps the latest
//! snapshot in a shared board. The "live" view is a polled re-fetch,
//! not a streaming subscription.
//!
//! ## Architecture
//!
//! - `provider` - the `OddsProvider` seam every REST client implements
//! - `odds_api` / `rapid_live` - concrete provider clients
//! - `normalize` - wire types and bookmaker-quote normalization
//! - `merge` - duplicate-fixture merging across providers
//! - `board` - latest-snapshot store shared with the server
//! - `poller` - best-effort fan-out over all configured providers

pub mod board;
pub mod error;
pub mod merge;
pub mod normalize;
pub mod odds_api;
pub mod poller;
pub mod provider;
pub mod rapid_live;

pub use board::*;
pub use error::*;
pub use merge::*;
pub use normalize::*;
pub use odds_api::*;
pub use poller::*;
pub use provider::*;
pub use rapid_live::*;
