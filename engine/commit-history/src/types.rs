//! Commit data as retrieved from version control.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One file touched by a commit: path plus the unified-diff body for that
/// file. Owned by its commit, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
  pub path: String,
  pub diff: String,
}

/// One commit as retrieved from the repository. Immutable once built; every
/// pipeline stage consumes it read-only.
#[derive(Debug, Clone, Serialize)]
pub struct Commit {
  pub hash: String,
  pub author: String,
  pub message: String,
  pub timestamp: DateTime<Utc>,
  pub files: Vec<FileChange>,
}

impl Commit {
  /// First line of the commit message, for status output.
  pub fn subject(&self) -> &str {
    self.message.lines().next().unwrap_or("")
  }
}
