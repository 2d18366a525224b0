//! Structured error types for the fingerprint engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  /// The analyzed window contains no commit messages; the vectorizer cannot
  /// be fit and the run must abort before any scoring.
  #[error("empty corpus: no commit messages to fit the vectorizer on")]
  EmptyCorpus,

  /// Fingerprints from different vectorizer fits are not comparable.
  #[error("fingerprint length mismatch: baseline has {expected} dims, got {got}")]
  DimensionMismatch { expected: usize, got: usize },
}
