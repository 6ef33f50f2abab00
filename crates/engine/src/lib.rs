//! Arbitrage computation engine.
//!
//! This crate contains the core logic for the dashboard: turning a set
//! of decimal odds into an equalized stake split when the bookmakers
//! collectively underprice an event, ranking matches by guaranteed
//! profit, and planning manual calculator stakes.
//!
//! Everything here is a pure function of its inputs: no I/O, no shared
//! mutable state, safe to call concurrently without coordination.

pub mod analyzer;
pub mod arbitrage;
pub mod calculator;

pub use analyzer::*;
pub use arbitrage::*;
pub use calculator::*;
