//! Core types for the log baseline learner.
//!
//! Holds the record model, the minute bucketer, the statistics engine, the
//! CLI settings and the shared error type.

pub mod error;
pub mod models;
pub mod settings;
pub mod stats;
pub mod time_utils;

pub use error::{BaselineError, Result};
