//! Running-mean baseline over historical fingerprints.

use crate::error::EngineError;
use crate::fingerprint::Fingerprint;

/// Cumulative baseline fingerprint. Two states: empty (initial) and seeded
/// (at least one fingerprint folded in).
///
/// The fold is a strict left-to-right two-term running mean:
/// `baseline := (baseline + fingerprint) / 2`. Recency is not privileged.
/// The commit under evaluation is never folded.
#[derive(Debug, Clone, Default)]
pub struct BaselineTracker {
  baseline: Option<Vec<f64>>,
}

impl BaselineTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Resume from a stored baseline snapshot.
  pub fn from_stored(baseline: Vec<f64>) -> Self {
    Self {
      baseline: Some(baseline),
    }
  }

  /// Fold one fingerprint in. The first fold seeds the baseline (no
  /// comparison is possible at that point); later folds average. Folding a
  /// fingerprint of a different length is an error: fingerprints from
  /// different vectorizer fits are not comparable.
  pub fn fold(&mut self, fingerprint: &Fingerprint) -> Result<(), EngineError> {
    match &mut self.baseline {
      None => {
        self.baseline = Some(fingerprint.as_slice().to_vec());
        Ok(())
      }
      Some(baseline) => {
        if baseline.len() != fingerprint.len() {
          return Err(EngineError::DimensionMismatch {
            expected: baseline.len(),
            got: fingerprint.len(),
          });
        }
        for (b, f) in baseline.iter_mut().zip(fingerprint.as_slice()) {
          *b = (*b + *f) / 2.0;
        }
        Ok(())
      }
    }
  }

  pub fn is_seeded(&self) -> bool {
    self.baseline.is_some()
  }

  pub fn baseline(&self) -> Option<&[f64]> {
    self.baseline.as_deref()
  }
}
