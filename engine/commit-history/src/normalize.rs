//! Diff normalization: the flat, sign-stripped code text both engines score.
//!
//! Hunk headers are dropped and the leading `+`/`-` of every remaining line
//! becomes a space, so column alignment (and with it every indentation-based
//! metric) survives normalization.

use crate::types::FileChange;

/// Normalize one diff body.
pub fn normalize_diff(diff: &str) -> String {
  let text = diff.replace("\\ No newline at end of file", "");
  let mut lines: Vec<String> = Vec::new();
  for line in text.lines() {
    if line.trim_start().starts_with("@@") {
      continue;
    }
    match line.as_bytes().first() {
      Some(b'+') | Some(b'-') => {
        let mut replaced = String::with_capacity(line.len());
        replaced.push(' ');
        replaced.push_str(&line[1..]);
        lines.push(replaced);
      }
      _ => lines.push(line.to_string()),
    }
  }
  lines.join("\n")
}

/// Normalize and concatenate all of a commit's file diffs (newline-joined)
/// into one snippet. Empty input yields an empty string.
pub fn normalize_files(files: &[FileChange]) -> String {
  let mut total = String::new();
  for file in files {
    total.push_str(&file.diff);
    total.push('\n');
  }
  normalize_diff(&total)
}
