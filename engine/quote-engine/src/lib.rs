//! Sponsorship Quote Engine
//!
//! Turns a creator's historical performance averages and a deal's requested
//! deliverables into a three-tier price quote (low/standard/stretch) with an
//! itemized breakdown. The computation is pure: no I/O, no state, identical
//! inputs always produce identical outputs.

pub mod calculator;
pub mod config;
pub mod models;

pub use calculator::{FlatRateEstimator, QuoteCalculator};
pub use config::{RateCard, RateCardError};
pub use models::*;
