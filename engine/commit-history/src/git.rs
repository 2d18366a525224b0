//! Git CLI adapter: clone, history walk, HEAD probe.
//!
//! One streaming `git log --reverse --patch` pass produces the whole analyzed
//! window, oldest -> newest, with full commit messages and per-file diffs.

use std::path::Path;
use std::process::{Command, Stdio};

use chrono::DateTime;

use crate::error::HistoryError;
use crate::types::{Commit, FileChange};

/// Record and field separators for the log format. Control characters cannot
/// appear in commit messages, so parsing stays unambiguous even for
/// multi-line bodies.
const RECORD_SEP: char = '\u{1e}';
const FIELD_SEP: char = '\u{1f}';

/// Create a `Command` for git with process-environment isolation.
///
/// Strips `GIT_DIR` and `GIT_WORK_TREE` so inherited environment variables
/// cannot override the explicit `-C` path used below.
fn git_cmd() -> Command {
  let mut cmd = Command::new("git");
  cmd.env_remove("GIT_DIR").env_remove("GIT_WORK_TREE");
  cmd
}

pub fn git_available() -> bool {
  git_cmd()
    .arg("--version")
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .status()
    .map(|s| s.success())
    .unwrap_or(false)
}

/// Clone `url` into `path` when no checkout exists there yet.
///
/// Returns `true` when a clone was performed, `false` when the existing
/// checkout is reused.
pub fn clone_if_missing(url: &str, path: &Path) -> Result<bool, HistoryError> {
  if path.exists() {
    return Ok(false);
  }
  let output = git_cmd()
    .arg("clone")
    .arg(url)
    .arg(path)
    .output()
    .map_err(|e| HistoryError::git("clone", e.to_string()))?;
  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    return Err(HistoryError::git("clone", stderr.trim().to_string()));
  }
  Ok(true)
}

/// Raw HEAD commit message (subject + body), for the skip-marker check.
pub fn head_message(repo_root: &Path) -> Result<String, HistoryError> {
  let output = git_cmd()
    .arg("-C")
    .arg(repo_root)
    .args(["log", "-1", "--pretty=format:%B"])
    .output()
    .map_err(|e| HistoryError::git("log", e.to_string()))?;
  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    return Err(HistoryError::git("log", stderr.trim().to_string()));
  }
  Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Collect the full commit history, oldest -> newest, with per-file diffs
/// restricted to `source_ext` (e.g. ".py").
pub fn collect_history(repo_root: &Path, source_ext: &str) -> Result<Vec<Commit>, HistoryError> {
  // %x1e / %x1f expand to the raw separator bytes in git's format language.
  let format = "--pretty=format:%x1e%H%x1f%an%x1f%ct%x1f%B%x1f";
  let output = git_cmd()
    .arg("-C")
    .arg(repo_root)
    .args(["log", "--reverse", "--patch", "--no-color", format])
    .output()
    .map_err(|e| HistoryError::git("log", e.to_string()))?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    return Err(HistoryError::git("log", stderr.trim().to_string()));
  }

  let text = String::from_utf8_lossy(&output.stdout);
  let mut commits = Vec::new();
  for record in text.split(RECORD_SEP).skip(1) {
    if let Some(commit) = parse_record(record, source_ext) {
      commits.push(commit);
    }
  }
  Ok(commits)
}

/// Parse one log record: `hash FS author FS epoch FS message FS patch`.
fn parse_record(record: &str, source_ext: &str) -> Option<Commit> {
  let mut parts = record.splitn(5, FIELD_SEP);
  let hash = parts.next()?.to_string();
  let author = parts.next()?.to_string();
  let epoch = parts.next()?.parse::<i64>().unwrap_or(0);
  let message = parts.next()?.to_string();
  let patch = parts.next().unwrap_or("");

  if hash.is_empty() {
    return None;
  }

  Some(Commit {
    hash,
    author,
    message,
    timestamp: DateTime::from_timestamp(epoch, 0).unwrap_or(DateTime::UNIX_EPOCH),
    files: parse_patch(patch, source_ext),
  })
}

/// Split a commit patch into per-file changes, keeping only the hunk region
/// (from the first `@@` line) of files with the tracked extension.
///
/// Binary files and merge commits produce no hunks and therefore empty file
/// lists; that degrades to neutral feature values downstream, never an error.
fn parse_patch(patch: &str, source_ext: &str) -> Vec<FileChange> {
  let mut files = Vec::new();
  let mut a_path: Option<String> = None;
  let mut b_path: Option<String> = None;
  let mut body: Vec<&str> = Vec::new();
  let mut in_hunks = false;

  let flush =
    |a: &mut Option<String>, b: &mut Option<String>, body: &mut Vec<&str>, files: &mut Vec<FileChange>| {
      // Deleted files have `+++ /dev/null`; fall back to the old path.
      let path = b.take().or_else(|| a.take());
      if let Some(path) = path {
        if path.ends_with(source_ext) && !body.is_empty() {
          files.push(FileChange {
            path,
            diff: body.join("\n"),
          });
        }
      }
      body.clear();
    };

  for line in patch.lines() {
    if line.starts_with("diff --git ") {
      flush(&mut a_path, &mut b_path, &mut body, &mut files);
      a_path = None;
      b_path = None;
      in_hunks = false;
      continue;
    }
    if in_hunks {
      body.push(line);
      continue;
    }
    if let Some(p) = line.strip_prefix("--- a/") {
      a_path = Some(p.to_string());
    } else if let Some(p) = line.strip_prefix("+++ b/") {
      b_path = Some(p.to_string());
    } else if line.starts_with("@@") {
      in_hunks = true;
      body.push(line);
    }
  }
  flush(&mut a_path, &mut b_path, &mut body, &mut files);
  files
}
