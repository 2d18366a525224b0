//! Data-driven scoring rules: pattern -> category, extensible without code
//! change. The defaults mirror the keyword lists the gate has always used.

use regex::Regex;
use serde::Serialize;

/// Which sub-score a rule feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
  Complexity,
  SensitiveData,
  Dependency,
}

/// How a rule matches the normalized diff text.
#[derive(Debug, Clone)]
pub enum Matcher {
  /// Case-sensitive substring; each non-overlapping occurrence counts.
  Keyword(String),
  /// Case-insensitive substring; presence counts once.
  KeywordInsensitive(String),
  /// Regex; each match counts.
  Pattern(Regex),
}

#[derive(Debug, Clone)]
pub struct Rule {
  pub category: RuleCategory,
  pub matcher: Matcher,
}

/// The active rule set. Build from `default()` and extend with `push` to add
/// patterns without touching scoring code.
#[derive(Debug, Clone)]
pub struct RuleSet {
  rules: Vec<Rule>,
}

const COMPLEXITY_KEYWORDS: [&str; 6] = ["if", "for", "while", "switch", "try", "catch"];

const SENSITIVE_KEYWORDS: [&str; 11] = [
  "password",
  "secret",
  "token",
  "api_key",
  "api_token",
  "rest_key",
  "credential",
  "db_pass",
  "dbpass",
  "db_password",
  "dbpassword",
];

impl Default for RuleSet {
  fn default() -> Self {
    let mut rules = Vec::new();
    for kw in COMPLEXITY_KEYWORDS {
      rules.push(Rule {
        category: RuleCategory::Complexity,
        matcher: Matcher::Keyword(kw.to_string()),
      });
    }
    for kw in SENSITIVE_KEYWORDS {
      rules.push(Rule {
        category: RuleCategory::SensitiveData,
        matcher: Matcher::KeywordInsensitive(kw.to_string()),
      });
    }
    rules.push(Rule {
      category: RuleCategory::Dependency,
      matcher: Matcher::Pattern(Regex::new(r"import\s+[a-zA-Z_]+").unwrap()),
    });
    Self { rules }
  }
}

impl RuleSet {
  pub fn push(&mut self, rule: Rule) {
    self.rules.push(rule);
  }

  pub fn in_category(&self, category: RuleCategory) -> impl Iterator<Item = &Rule> {
    self.rules.iter().filter(move |r| r.category == category)
  }

  /// Total match count for one rule against the normalized diff.
  pub fn count_matches(rule: &Rule, text: &str, lowered: &str) -> usize {
    match &rule.matcher {
      Matcher::Keyword(kw) => text.matches(kw.as_str()).count(),
      Matcher::KeywordInsensitive(kw) => {
        if lowered.contains(kw.as_str()) {
          1
        } else {
          0
        }
      }
      Matcher::Pattern(re) => re.find_iter(text).count(),
    }
  }
}
