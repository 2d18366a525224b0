//! Commit Gate Fingerprint Engine — deterministic anomaly scoring.
//!
//! Builds one fixed-length numeric vector per commit (TF-IDF message
//! embedding concatenated with scaled structural code features), folds prior
//! commits into a running-mean baseline, and flags the evaluated commit when
//! its cosine similarity to that baseline drops below a threshold.
//!
//! No AI, no DB, no network; pure computation.

pub mod anomaly;
pub mod baseline;
pub mod config;
pub mod error;
pub mod features;
pub mod fingerprint;
pub mod vectorizer;

pub use anomaly::Verdict;
pub use baseline::BaselineTracker;
pub use config::Config;
pub use error::EngineError;
pub use features::StructuralFeatures;
pub use fingerprint::{Fingerprint, FingerprintBuilder};
pub use vectorizer::TfidfVectorizer;
