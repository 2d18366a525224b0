//! Gate configuration: read once from the environment at startup, then
//! passed by reference into every stage. No process-wide singletons.

use std::env;
use std::path::PathBuf;

use crate::error::GateError;

/// Everything the pipeline needs, resolved up front.
#[derive(Debug, Clone)]
pub struct GateConfig {
  /// Source to clone when the checkout is absent.
  pub repo_url: String,
  /// Local checkout location.
  pub repo_path: PathBuf,
  /// Tracked source-file extension for diff analysis.
  pub source_ext: String,
  /// When set, the anomaly gate compares against a stored baseline snapshot
  /// instead of only the freshly computed history baseline.
  pub snapshot_path: Option<PathBuf>,
  /// Fingerprinting knobs (scaling factor, anomaly threshold).
  pub engine: fingerprint_engine::Config,
  /// Risk sub-score weights.
  pub weights: risk_engine::Weights,
  /// Risk total at or above this fails the risk gate.
  pub risk_threshold: f64,
}

impl Default for GateConfig {
  fn default() -> Self {
    Self {
      repo_url: "https://github.com/commit-gate/sample-app".into(),
      repo_path: PathBuf::from("./repository"),
      source_ext: ".py".into(),
      snapshot_path: None,
      engine: fingerprint_engine::Config::default(),
      weights: risk_engine::Weights::default(),
      risk_threshold: 18.0,
    }
  }
}

/// Read a float binding; a set-but-unparsable value is a configuration
/// error, never a silent fallback.
fn env_f64(name: &str, default: f64) -> Result<f64, GateError> {
  match env::var(name) {
    Ok(raw) => raw
      .trim()
      .parse::<f64>()
      .map_err(|_| GateError::config(name, format!("expected a number, got {:?}", raw))),
    Err(_) => Ok(default),
  }
}

fn env_string(name: &str, default: &str) -> String {
  env::var(name).unwrap_or_else(|_| default.to_string())
}

impl GateConfig {
  /// Resolve the full configuration from the environment.
  pub fn from_env() -> Result<Self, GateError> {
    let defaults = Self::default();
    Ok(Self {
      repo_url: env_string("REPO_URL", &defaults.repo_url),
      repo_path: PathBuf::from(env_string(
        "REPO_PATH",
        &defaults.repo_path.to_string_lossy(),
      )),
      source_ext: env_string("SOURCE_EXT", &defaults.source_ext),
      snapshot_path: env::var("BASELINE_SNAPSHOT_PATH").ok().map(PathBuf::from),
      engine: fingerprint_engine::Config {
        scaling_factor: env_f64("SCALING_FACTOR", defaults.engine.scaling_factor)?,
        anomaly_threshold: env_f64("FINGERPRINT_THRESHOLD", defaults.engine.anomaly_threshold)?,
      },
      weights: risk_engine::Weights {
        complexity: env_f64("COMPLEXITY_WEIGHT", defaults.weights.complexity)?,
        frequency: env_f64("FREQUENCY_WEIGHT", defaults.weights.frequency)?,
        sensitive_data: env_f64("SENSITIVE_DATA_WEIGHT", defaults.weights.sensitive_data)?,
        external_dependencies: env_f64(
          "EXTERNAL_DEPENDENCIES_WEIGHT",
          defaults.weights.external_dependencies,
        )?,
      },
      risk_threshold: env_f64("RISK_THRESHOLD", defaults.risk_threshold)?,
    })
  }
}
