//! Engine configuration with sane defaults.

/// Tunable knobs for fingerprinting and anomaly detection. Constructed once
/// at pipeline start and passed by reference into each stage.
#[derive(Debug, Clone)]
pub struct Config {
  /// Uniform scale applied to all normalized structural feature dimensions.
  pub scaling_factor: f64,
  /// Cosine similarity below this flags the commit as anomalous.
  pub anomaly_threshold: f64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      scaling_factor: 0.2,
      anomaly_threshold: 0.088,
    }
  }
}
