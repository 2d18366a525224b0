//! The gate pipeline: one strict forward pass over the commit window.
//!
//! Order is a correctness invariant. The vectorizer is fit exactly once over
//! the whole window; every commit except the newest folds into the baseline;
//! the newest commit is the subject under test for both gates.

use std::collections::HashMap;

use commit_history::{git, normalize, Commit};
use fingerprint_engine::{anomaly, BaselineTracker, FingerprintBuilder, TfidfVectorizer, Verdict};
use risk_engine::RuleSet;
use serde::Serialize;

use crate::config::GateConfig;
use crate::error::GateError;
use crate::store::{BaselineStore, JsonFileStore};
use crate::SKIP_MARKER;

/// Result of one gate run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
  /// Analysis was skipped entirely (marked HEAD commit); the gate passes.
  Skipped { reason: String },
  Evaluated(GateReport),
}

/// Everything the run decided about the evaluated commit.
#[derive(Debug, Clone, Serialize)]
pub struct GateReport {
  /// Stable id for this evaluation: hash of commit hash + checkout path.
  pub report_id: String,
  pub commit_hash: String,
  pub commit_subject: String,
  /// `None` when there was no baseline to compare against (single-commit
  /// window): the tracker seeds and no verdict is emitted.
  pub anomaly: Option<Verdict>,
  pub risk: risk_engine::Breakdown,
  pub risk_exceeded: bool,
}

impl GateReport {
  /// Either gate failing fails the run.
  pub fn failed(&self) -> bool {
    self.anomaly.map(|v| v.anomalous).unwrap_or(false) || self.risk_exceeded
  }
}

/// Run both gates against the newest commit of the configured repository.
pub fn run(config: &GateConfig) -> Result<GateOutcome, GateError> {
  if git::clone_if_missing(&config.repo_url, &config.repo_path)? {
    println!(
      "Cloned {} into {}",
      config.repo_url,
      config.repo_path.display()
    );
  } else {
    println!("Using existing checkout at {}", config.repo_path.display());
  }

  // A marked HEAD commit bypasses analysis entirely.
  let head = git::head_message(&config.repo_path)?;
  if head.contains(SKIP_MARKER) {
    return Ok(GateOutcome::Skipped {
      reason: format!("HEAD commit is marked {}", SKIP_MARKER),
    });
  }

  let mut commits = git::collect_history(&config.repo_path, &config.source_ext)?;
  commits.retain(|c| !c.message.contains(SKIP_MARKER));
  if commits.is_empty() {
    return Err(GateError::config(
      "commit window",
      "no commits to analyze (empty corpus)",
    ));
  }

  // One fit per run; fingerprints from different fits are incomparable.
  let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
  let vectorizer = TfidfVectorizer::fit(&messages)?;
  let builder = FingerprintBuilder::new(&vectorizer, &config.engine);

  // File touch counts across the whole window, for the frequency sub-score.
  let mut touch_counts: HashMap<String, u32> = HashMap::new();
  for commit in &commits {
    for file in &commit.files {
      *touch_counts.entry(file.path.clone()).or_insert(0) += 1;
    }
  }

  let (evaluated, history) = commits.split_last().expect("window checked non-empty");
  let mut tracker = BaselineTracker::new();
  for commit in history {
    tracker.fold(&builder.build(commit))?;
  }

  let fingerprint = builder.build(evaluated);

  let anomaly = match &config.snapshot_path {
    Some(path) => {
      let store = JsonFileStore::new(path.clone());
      // A snapshot from a different vectorizer fit is incomparable; it is
      // discarded and overwritten (snapshots are unversioned by design).
      let stored = store
        .load()?
        .filter(|stored| stored.len() == fingerprint.len());
      let compare = stored.or_else(|| tracker.baseline().map(|b| b.to_vec()));
      // Newest snapshot always overwrites; a windowless run seeds it with
      // the evaluated fingerprint itself.
      match tracker.baseline() {
        Some(baseline) => store.save(baseline)?,
        None => store.save(fingerprint.as_slice())?,
      }
      compare.map(|b| anomaly::detect(&b, fingerprint.as_slice(), config.engine.anomaly_threshold))
    }
    None => tracker
      .baseline()
      .map(|b| anomaly::detect(b, fingerprint.as_slice(), config.engine.anomaly_threshold)),
  };

  let rules = RuleSet::default();
  let diff = normalize::normalize_files(&evaluated.files);
  let files: Vec<String> = evaluated.files.iter().map(|f| f.path.clone()).collect();
  let risk = risk_engine::score_commit(&diff, &files, &touch_counts, &rules, &config.weights);
  let risk_exceeded = risk.total >= config.risk_threshold;

  Ok(GateOutcome::Evaluated(GateReport {
    report_id: report_id(evaluated, config),
    commit_hash: evaluated.hash.clone(),
    commit_subject: evaluated.subject().to_string(),
    anomaly,
    risk,
    risk_exceeded,
  }))
}

/// Stable evaluation id: hash of commit hash + checkout path.
fn report_id(commit: &Commit, config: &GateConfig) -> String {
  let mut hasher = blake3::Hasher::new();
  hasher.update(commit.hash.as_bytes());
  hasher.update(b"|");
  hasher.update(config.repo_path.to_string_lossy().as_bytes());
  let hex = hasher.finalize().to_hex();
  format!("gate-{}", &hex[..16])
}
