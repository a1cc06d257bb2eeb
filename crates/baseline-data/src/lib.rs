//! Data layer for the log baseline learner.
//!
//! Responsible for reading CSV log exports, counting events per source and
//! minute, reducing the counts to per-source statistics and persisting the
//! resulting profile.

pub mod aggregator;
pub mod analysis;
pub mod reader;
pub mod writer;

pub use baseline_core as core;
