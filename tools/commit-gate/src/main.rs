//! Binary entrypoint: configure from the environment, run the gate, print
//! status lines.
//!
//! Exit codes: 0 = both gates pass (or analysis skipped), 1 = anomaly
//! detected or risk threshold exceeded, 2 = configuration or git failure
//! before any verdict.

use std::process;

use commit_gate::{pipeline, GateConfig, GateError, GateOutcome};

fn main() {
  match run() {
    Ok(code) => process::exit(code),
    Err(e) => {
      eprintln!("commit-gate error: {}", e);
      process::exit(2);
    }
  }
}

fn run() -> Result<i32, GateError> {
  let config = GateConfig::from_env()?;
  let outcome = pipeline::run(&config)?;

  let report = match outcome {
    GateOutcome::Skipped { reason } => {
      println!("Skipping analysis: {}", reason);
      return Ok(0);
    }
    GateOutcome::Evaluated(report) => report,
  };

  match &report.anomaly {
    Some(v) if v.anomalous => println!(
      "Anomaly detected in commit {}: {} ({})",
      report.commit_hash, report.commit_subject, v.similarity
    ),
    Some(v) => println!(
      "No anomaly detected in commit {}: {} ({})",
      report.commit_hash, report.commit_subject, v.similarity
    ),
    None => println!(
      "Baseline seeded from commit {}: {} (no prior history to compare)",
      report.commit_hash, report.commit_subject
    ),
  }

  if report.risk_exceeded {
    println!("Code exceeds the risk threshold (score: {})", report.risk.total);
  } else {
    println!(
      "Code does not exceed the risk threshold (score: {})",
      report.risk.total
    );
  }

  let verdict = if report.failed() { "FAIL" } else { "PASS" };
  println!("Gate report {}: {}", report.report_id, verdict);

  Ok(if report.failed() { 1 } else { 0 })
}
