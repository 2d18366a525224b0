//! Structural code metrics from normalized diff text.
//!
//! All heuristics are purely textual: a file that fails to look like code
//! simply yields neutral zero values, never an error.

use std::sync::LazyLock;

use commit_history::normalize::normalize_diff;
use commit_history::Commit;
use regex::Regex;
use serde::Serialize;

static SNAKE_CASE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b[a-z]+(?:_[a-z]+)+\b").unwrap());
static CAMEL_CASE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b[a-z]+(?:[A-Z][a-z]*)+\b").unwrap());

/// Per-commit scalar feature bundle.
///
/// Declared ranges: nesting depth [0, 6], indentation [0, 21], ratios [0, 1].
/// Values outside these ranges are possible and are not re-clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StructuralFeatures {
  pub avg_nesting_depth: f64,
  pub avg_indentation: f64,
  pub snake_case_ratio: f64,
  pub camel_case_ratio: f64,
}

impl StructuralFeatures {
  pub const ZERO: Self = Self {
    avg_nesting_depth: 0.0,
    avg_indentation: 0.0,
    snake_case_ratio: 0.0,
    camel_case_ratio: 0.0,
  };
}

fn leading_whitespace(line: &str) -> usize {
  line.len() - line.trim_start().len()
}

/// Mean nesting level over non-blank, non-comment lines; one level per four
/// columns of indentation. 0 when no such lines exist.
fn avg_nesting_depth(code: &str) -> f64 {
  let mut levels: Vec<f64> = Vec::new();
  for line in code.lines() {
    let stripped = line.trim_start();
    if stripped.is_empty() || stripped.starts_with('#') {
      continue;
    }
    levels.push(leading_whitespace(line) as f64);
  }
  if levels.is_empty() {
    return 0.0;
  }
  let avg: f64 = levels.iter().sum::<f64>() / levels.len() as f64;
  avg / 4.0
}

/// Mean leading-whitespace width over non-blank lines (comments included).
fn avg_indentation(code: &str) -> f64 {
  let mut widths: Vec<f64> = Vec::new();
  for line in code.lines() {
    if !line.trim_start().is_empty() {
      widths.push(leading_whitespace(line) as f64);
    }
  }
  if widths.is_empty() {
    return 0.0;
  }
  widths.iter().sum::<f64>() / widths.len() as f64
}

/// Pattern-based (not identifier-aware) snake/camel ratios over the whole
/// text. Both 0 when neither pattern matches, avoiding division by zero.
fn naming_ratios(code: &str) -> (f64, f64) {
  let snake = SNAKE_CASE.find_iter(code).count();
  let camel = CAMEL_CASE.find_iter(code).count();
  let total = snake + camel;
  if total == 0 {
    return (0.0, 0.0);
  }
  (snake as f64 / total as f64, camel as f64 / total as f64)
}

/// Features of one normalized file diff.
pub fn extract_file(normalized: &str) -> StructuralFeatures {
  let (snake, camel) = naming_ratios(normalized);
  StructuralFeatures {
    avg_nesting_depth: avg_nesting_depth(normalized),
    avg_indentation: avg_indentation(normalized),
    snake_case_ratio: snake,
    camel_case_ratio: camel,
  }
}

/// Per-file metrics averaged (arithmetic mean) across all of a commit's
/// files. A commit with no tracked files yields the all-zero record.
pub fn extract_commit(commit: &Commit) -> StructuralFeatures {
  if commit.files.is_empty() {
    return StructuralFeatures::ZERO;
  }
  let mut sum = [0.0f64; 4];
  for file in &commit.files {
    let f = extract_file(&normalize_diff(&file.diff));
    sum[0] += f.avg_nesting_depth;
    sum[1] += f.avg_indentation;
    sum[2] += f.snake_case_ratio;
    sum[3] += f.camel_case_ratio;
  }
  let n = commit.files.len() as f64;
  StructuralFeatures {
    avg_nesting_depth: sum[0] / n,
    avg_indentation: sum[1] / n,
    snake_case_ratio: sum[2] / n,
    camel_case_ratio: sum[3] / n,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use commit_history::FileChange;

  fn make_commit(files: Vec<(&str, &str)>) -> Commit {
    Commit {
      hash: "abc".into(),
      author: "a".into(),
      message: "m".into(),
      timestamp: chrono::DateTime::UNIX_EPOCH,
      files: files
        .into_iter()
        .map(|(path, diff)| FileChange {
          path: path.into(),
          diff: diff.into(),
        })
        .collect(),
    }
  }

  #[test]
  fn nesting_depth_is_indentation_over_four() {
    // Two code lines at 0 and 8 columns -> mean width 4 -> depth 1.
    let code = "def f():\n        return 1";
    assert!((avg_nesting_depth(code) - 1.0).abs() < 1e-9);
  }

  #[test]
  fn nesting_skips_blank_and_comment_lines() {
    let code = "    # a deeply indented comment\n\nx = 1";
    assert!((avg_nesting_depth(code) - 0.0).abs() < 1e-9);
  }

  #[test]
  fn indentation_counts_comment_lines() {
    // Unlike nesting, indentation averages over comments too.
    let code = "    # comment\nx = 1";
    assert!((avg_indentation(code) - 2.0).abs() < 1e-9);
  }

  #[test]
  fn naming_ratios_sum_to_one_when_present() {
    let code = "snake_name = camelName + other_thing";
    let (snake, camel) = naming_ratios(code);
    assert!((snake - 2.0 / 3.0).abs() < 1e-9);
    assert!((camel - 1.0 / 3.0).abs() < 1e-9);
  }

  #[test]
  fn naming_ratios_zero_without_matches() {
    let (snake, camel) = naming_ratios("x = 1");
    assert_eq!(snake, 0.0);
    assert_eq!(camel, 0.0);
  }

  #[test]
  fn empty_commit_yields_zero_features() {
    let commit = make_commit(vec![]);
    assert_eq!(extract_commit(&commit), StructuralFeatures::ZERO);
  }

  #[test]
  fn commit_features_are_mean_over_files() {
    // The sign column normalizes to a space, so "+    x = 1" carries width 5
    // and "+y = 2" carries width 1; the commit averages the two files.
    let commit = make_commit(vec![("a.py", "+    x = 1"), ("b.py", "+y = 2")]);
    let f = extract_commit(&commit);
    assert!((f.avg_indentation - 3.0).abs() < 1e-9);
  }
}
