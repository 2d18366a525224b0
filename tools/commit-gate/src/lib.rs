//! Commit Gate driver — library surface for the binary and the tests.
//!
//! Orchestrates history extraction, the one-time vectorizer fit, baseline
//! folding, and both gates over an ordered commit window. Strictly
//! sequential; processing order is a correctness invariant, not an
//! optimization.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod store;

pub use config::GateConfig;
pub use error::GateError;
pub use pipeline::{GateOutcome, GateReport};
pub use store::{BaselineStore, JsonFileStore};

/// Commits whose message contains this marker are excluded from analysis;
/// a marked HEAD commit skips the whole run.
pub const SKIP_MARKER: &str = "#no_anomaly";
