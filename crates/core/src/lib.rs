//! Core data types for the surebet dashboard.

pub mod arbitrage;
pub mod error;
pub mod market;
pub mod matches;
pub mod odds;

pub use arbitrage::*;
pub use error::*;
pub use market::*;
pub use matches::*;
pub use odds::*;
