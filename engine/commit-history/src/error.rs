//! Structured error types for history extraction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
  #[error("git {action}: {detail}")]
  Git { action: String, detail: String },

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl HistoryError {
  pub fn git(action: &str, detail: impl Into<String>) -> Self {
    Self::Git {
      action: action.to_string(),
      detail: detail.into(),
    }
  }
}
