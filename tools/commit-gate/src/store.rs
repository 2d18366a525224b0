//! Baseline snapshot persistence behind a small store interface.
//!
//! One key, one value: the newest baseline always overwrites. Swapping the
//! JSON file for any durable store only touches this module.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GateError;

/// Load/save contract for a stored baseline fingerprint.
pub trait BaselineStore {
  /// `Ok(None)` when no snapshot has been written yet.
  fn load(&self) -> Result<Option<Vec<f64>>, GateError>;
  fn save(&self, baseline: &[f64]) -> Result<(), GateError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
  baseline: Vec<f64>,
}

/// JSON-file-backed store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  path: PathBuf,
}

impl JsonFileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl BaselineStore for JsonFileStore {
  fn load(&self) -> Result<Option<Vec<f64>>, GateError> {
    if !self.path.exists() {
      return Ok(None);
    }
    let raw = fs::read_to_string(&self.path)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    Ok(Some(snapshot.baseline))
  }

  fn save(&self, baseline: &[f64]) -> Result<(), GateError> {
    let snapshot = Snapshot {
      baseline: baseline.to_vec(),
    };
    fs::write(&self.path, serde_json::to_string(&snapshot)?)?;
    Ok(())
  }
}
