//! End-to-end fingerprint pipeline over a fixture commit window.

use commit_history::{Commit, FileChange};
use fingerprint_engine::{anomaly, BaselineTracker, Config, FingerprintBuilder, TfidfVectorizer};

fn commit(message: &str, files: Vec<(&str, &str)>) -> Commit {
  Commit {
    hash: format!("hash-{}", message.len()),
    author: "dev".into(),
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

fn window() -> Vec<Commit> {
  vec![
    commit(
      "add user parser",
      vec![("app/parse.py", "@@ -0,0 +1,2 @@\n+def parse_user(raw):\n+    return raw.strip()")],
    ),
    commit(
      "fix user parser bug",
      vec![("app/parse.py", "@@ -1,2 +1,3 @@\n def parse_user(raw):\n+    raw = raw or ''\n     return raw.strip()")],
    ),
    commit(
      "add user formatter",
      vec![("app/fmt.py", "@@ -0,0 +1,2 @@\n+def format_user(user_name):\n+    return user_name.title()")],
    ),
  ]
}

#[test]
fn ordinary_window_stays_non_anomalous() {
  let commits = window();
  let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
  let vectorizer = TfidfVectorizer::fit(&messages).unwrap();
  let config = Config::default();
  let builder = FingerprintBuilder::new(&vectorizer, &config);

  let mut tracker = BaselineTracker::new();
  for c in &commits[..commits.len() - 1] {
    tracker.fold(&builder.build(c)).unwrap();
  }

  let evaluated = builder.build(commits.last().unwrap());
  let verdict = anomaly::detect(
    tracker.baseline().unwrap(),
    evaluated.as_slice(),
    config.anomaly_threshold,
  );
  // Shared vocabulary ("add", "user") and similar structure keep the commit
  // above the default threshold.
  assert!(!verdict.anomalous, "similarity was {}", verdict.similarity);
  assert!(verdict.similarity > 0.088);
}

#[test]
fn single_commit_window_emits_no_verdict() {
  let commits = vec![commit("initial import", vec![])];
  let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
  let vectorizer = TfidfVectorizer::fit(&messages).unwrap();
  let builder = FingerprintBuilder::new(&vectorizer, &Config::default());

  let mut tracker = BaselineTracker::new();
  // All commits except the evaluated one: nothing to fold.
  for c in &commits[..commits.len() - 1] {
    tracker.fold(&builder.build(c)).unwrap();
  }
  // No baseline -> no verdict can be emitted for the evaluated commit.
  assert!(tracker.baseline().is_none());
}

#[test]
fn all_fingerprints_share_one_length() {
  let commits = window();
  let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
  let vectorizer = TfidfVectorizer::fit(&messages).unwrap();
  let builder = FingerprintBuilder::new(&vectorizer, &Config::default());

  let lengths: Vec<usize> = commits.iter().map(|c| builder.build(c).len()).collect();
  assert!(lengths.windows(2).all(|w| w[0] == w[1]));
  assert_eq!(lengths[0], vectorizer.vocabulary_len() + 4);
}

#[test]
fn unrelated_message_and_structure_scores_low() {
  let mut commits = window();
  commits.push(commit(
    "ZZZ qqq xyzzy",
    vec![(
      "app/odd.py",
      "@@ -0,0 +1,3 @@\n+                    deepCamel = weirdThing\n+                    moreCamel = otherThing\n+                    lastCamel = finalThing",
    )],
  ));
  let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
  let vectorizer = TfidfVectorizer::fit(&messages).unwrap();
  let config = Config::default();
  let builder = FingerprintBuilder::new(&vectorizer, &config);

  let mut tracker = BaselineTracker::new();
  for c in &commits[..commits.len() - 1] {
    tracker.fold(&builder.build(c)).unwrap();
  }
  let evaluated = builder.build(commits.last().unwrap());
  let verdict = anomaly::detect(
    tracker.baseline().unwrap(),
    evaluated.as_slice(),
    config.anomaly_threshold,
  );
  // Novel vocabulary and inverted structure: similarity well below the
  // history's self-similarity band.
  assert!(verdict.similarity < 0.9);
}
