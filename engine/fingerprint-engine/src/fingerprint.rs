//! Fingerprint assembly: message embedding ++ scaled structural features.

use commit_history::Commit;
use serde::Serialize;

use crate::config::Config;
use crate::features;
use crate::vectorizer::TfidfVectorizer;

/// Declared min/max per structural dimension (nesting, indentation, snake
/// ratio, camel ratio). Used for min-max normalization; out-of-range values
/// are not re-clamped.
pub const FEATURE_MIN: [f64; 4] = [0.0, 0.0, 0.0, 0.0];
pub const FEATURE_MAX: [f64; 4] = [6.0, 21.0, 1.0, 1.0];

/// A commit's fixed-length numeric signature. Length = vocabulary size + 4;
/// only fingerprints from the same vectorizer fit are comparable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fingerprint(pub Vec<f64>);

impl Fingerprint {
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn as_slice(&self) -> &[f64] {
    &self.0
  }
}

/// Builds fingerprints against one fitted vectorizer and one scaling factor.
pub struct FingerprintBuilder<'a> {
  vectorizer: &'a TfidfVectorizer,
  scaling_factor: f64,
}

impl<'a> FingerprintBuilder<'a> {
  pub fn new(vectorizer: &'a TfidfVectorizer, config: &Config) -> Self {
    Self {
      vectorizer,
      scaling_factor: config.scaling_factor,
    }
  }

  /// `embed(message) ++ scale * (features - min) / (max - min)`.
  pub fn build(&self, commit: &Commit) -> Fingerprint {
    let mut v = self.vectorizer.transform(&commit.message);

    let f = features::extract_commit(commit);
    let raw = [
      f.avg_nesting_depth,
      f.avg_indentation,
      f.snake_case_ratio,
      f.camel_case_ratio,
    ];
    for i in 0..4 {
      let normalized = (raw[i] - FEATURE_MIN[i]) / (FEATURE_MAX[i] - FEATURE_MIN[i]);
      v.push(self.scaling_factor * normalized);
    }
    Fingerprint(v)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use commit_history::FileChange;

  fn make_commit(message: &str, files: Vec<(&str, &str)>) -> Commit {
    Commit {
      hash: "abc".into(),
      author: "a".into(),
      message: message.into(),
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
  fn length_is_vocabulary_plus_four() {
    let v = TfidfVectorizer::fit(&["fix parser bug", "add feature"]).unwrap();
    let builder = FingerprintBuilder::new(&v, &Config::default());
    let fp = builder.build(&make_commit("fix parser bug", vec![]));
    assert_eq!(fp.len(), v.vocabulary_len() + 4);
  }

  #[test]
  fn feature_at_declared_min_normalizes_to_zero() {
    let v = TfidfVectorizer::fit(&["msg one", "msg two"]).unwrap();
    let builder = FingerprintBuilder::new(&v, &Config::default());
    // No files -> all structural features at their declared minimum.
    let fp = builder.build(&make_commit("msg one", vec![]));
    let tail = &fp.as_slice()[fp.len() - 4..];
    assert!(tail.iter().all(|x| *x == 0.0));
  }

  #[test]
  fn feature_at_declared_max_normalizes_to_scaling_factor() {
    let config = Config {
      scaling_factor: 0.2,
      ..Config::default()
    };
    let v = TfidfVectorizer::fit(&["msg"]).unwrap();
    let builder = FingerprintBuilder::new(&v, &config);
    // A single all-snake line, indented 20 columns plus the normalized sign
    // column: indentation 21 (declared max) and snake ratio 1.0.
    let diff = format!("+{}snake_case_name = other_name", " ".repeat(20));
    let fp = builder.build(&make_commit("msg", vec![("a.py", &diff)]));
    let tail = &fp.as_slice()[fp.len() - 4..];
    // Indentation dim: exactly scaling_factor at the declared max.
    assert!((tail[1] - 0.2).abs() < 1e-12);
    // Snake ratio dim: exactly scaling_factor at ratio 1.0.
    assert!((tail[2] - 0.2).abs() < 1e-12);
    assert_eq!(tail[3], 0.0);
  }

  #[test]
  fn deterministic_for_same_inputs() {
    let v = TfidfVectorizer::fit(&["fix parser bug"]).unwrap();
    let builder = FingerprintBuilder::new(&v, &Config::default());
    let commit = make_commit("fix parser bug", vec![("a.py", "+x = foo_bar")]);
    assert_eq!(builder.build(&commit), builder.build(&commit));
  }
}
