//! Cosine-similarity anomaly detection against the baseline.

use serde::Serialize;

/// Cosine similarity (dot product over the product of norms).
///
/// Returns `None` when either vector has zero norm; similarity is undefined
/// there and the caller treats the pair as non-anomalous by convention.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
  let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
  let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
  let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
  if norm_a == 0.0 || norm_b == 0.0 {
    return None;
  }
  // Clamp floating noise like 1.0000000000000002.
  Some((dot / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

/// Anomaly verdict plus the raw similarity for observability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
  pub anomalous: bool,
  pub similarity: f64,
  /// True when either vector had zero norm and the similarity is reported
  /// as 0.0 by convention rather than computed.
  pub degenerate: bool,
}

/// Compare the evaluated fingerprint to the baseline. Anomalous when the
/// similarity falls below `threshold`; degenerate pairs never flag.
pub fn detect(baseline: &[f64], fingerprint: &[f64], threshold: f64) -> Verdict {
  match cosine_similarity(baseline, fingerprint) {
    Some(similarity) => Verdict {
      anomalous: similarity < threshold,
      similarity,
      degenerate: false,
    },
    None => Verdict {
      anomalous: false,
      similarity: 0.0,
      degenerate: true,
    },
  }
}
