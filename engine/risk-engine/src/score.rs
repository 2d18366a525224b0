//! Sub-scores and the weighted total.

use std::collections::HashMap;

use serde::Serialize;

use crate::rules::{RuleCategory, RuleSet};

/// Configurable weights for the four sub-scores.
#[derive(Debug, Clone)]
pub struct Weights {
  pub complexity: f64,
  pub frequency: f64,
  pub sensitive_data: f64,
  pub external_dependencies: f64,
}

impl Default for Weights {
  fn default() -> Self {
    Self {
      complexity: 1.0,
      frequency: 20.0,
      sensitive_data: 30.0,
      external_dependencies: 5.0,
    }
  }
}

/// Per-sub-score values plus the weighted total, kept for observability.
#[derive(Debug, Clone, Serialize)]
pub struct Breakdown {
  pub complexity: f64,
  pub frequency: f64,
  pub sensitive_data: f64,
  pub external_dependencies: f64,
  pub total: f64,
}

/// Control-flow keyword occurrences in the normalized diff.
fn complexity_score(diff: &str, lowered: &str, rules: &RuleSet) -> f64 {
  rules
    .in_category(RuleCategory::Complexity)
    .map(|r| RuleSet::count_matches(r, diff, lowered))
    .sum::<usize>() as f64
}

/// Mean of `1 / (touch_count + 1)` over the commit's files: commits touching
/// rarely-changed files score higher (novelty). 0 when no files.
fn frequency_score(files: &[String], touch_counts: &HashMap<String, u32>) -> f64 {
  if files.is_empty() {
    return 0.0;
  }
  let sum: f64 = files
    .iter()
    .filter_map(|f| touch_counts.get(f))
    .map(|&count| 1.0 / (count as f64 + 1.0))
    .sum();
  sum / files.len() as f64
}

/// Any sensitive keyword present (case-insensitive)?
fn sensitive_data_flag(diff: &str, lowered: &str, rules: &RuleSet) -> bool {
  rules
    .in_category(RuleCategory::SensitiveData)
    .any(|r| RuleSet::count_matches(r, diff, lowered) > 0)
}

/// Import-like statement count.
fn dependency_score(diff: &str, lowered: &str, rules: &RuleSet) -> f64 {
  rules
    .in_category(RuleCategory::Dependency)
    .map(|r| RuleSet::count_matches(r, diff, lowered))
    .sum::<usize>() as f64
}

/// Score one commit: `normalized_diff` is the commit's flat diff text,
/// `files` its touched paths, `touch_counts` the per-path tally across the
/// whole analyzed window.
pub fn score_commit(
  normalized_diff: &str,
  files: &[String],
  touch_counts: &HashMap<String, u32>,
  rules: &RuleSet,
  weights: &Weights,
) -> Breakdown {
  let lowered = normalized_diff.to_lowercase();
  let complexity = complexity_score(normalized_diff, &lowered, rules);
  let frequency = frequency_score(files, touch_counts);
  let sensitive_data = if sensitive_data_flag(normalized_diff, &lowered, rules) {
    1.0
  } else {
    0.0
  };
  let external_dependencies = dependency_score(normalized_diff, &lowered, rules);

  let total = weights.complexity * complexity
    + weights.frequency * frequency
    + weights.sensitive_data * sensitive_data
    + weights.external_dependencies * external_dependencies;

  Breakdown {
    complexity,
    frequency,
    sensitive_data,
    external_dependencies,
    total,
  }
}
