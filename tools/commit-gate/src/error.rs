//! Gate-level error taxonomy.
//!
//! Everything here is fatal: the run aborts before a verdict and the process
//! exits 2. Per-commit feature degradation never surfaces as an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
  #[error("config: {name}: {reason}")]
  Config { name: String, reason: String },

  #[error("history: {0}")]
  History(#[from] commit_history::HistoryError),

  #[error("engine: {0}")]
  Engine(#[from] fingerprint_engine::EngineError),

  #[error("snapshot io: {0}")]
  SnapshotIo(#[from] std::io::Error),

  #[error("snapshot format: {0}")]
  SnapshotFormat(#[from] serde_json::Error),
}

impl GateError {
  pub fn config(name: &str, reason: impl Into<String>) -> Self {
    Self::Config {
      name: name.to_string(),
      reason: reason.into(),
    }
  }
}
