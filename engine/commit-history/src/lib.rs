//! Commit Gate History Extractor — one git adapter for every pipeline stage.
//!
//! Clones or opens a local checkout, walks the full history oldest -> newest
//! with per-file unified diffs, and normalizes diff text into the flat code
//! snippet both scoring engines consume.
//!
//! Shells out to the git CLI; no daemon, no network beyond `git clone`.

pub mod error;
pub mod git;
pub mod normalize;
pub mod types;

pub use error::HistoryError;
pub use types::{Commit, FileChange};
