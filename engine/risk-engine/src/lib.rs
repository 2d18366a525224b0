//! Commit Gate Risk Engine — rule-based scoring; no AI, no DB, no network.
//!
//! Computes four independent sub-scores over the evaluated commit's
//! normalized diff and file list, then a weighted total. Unrelated to the
//! fingerprint path: a commit can be statistically ordinary and still risky.

mod rules;
mod score;

pub use rules::{Matcher, Rule, RuleCategory, RuleSet};
pub use score::{score_commit, Breakdown, Weights};
