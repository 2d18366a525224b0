//! Term-weighting message vectorizer (TF-IDF).
//!
//! Fit exactly once per run over every commit message in the analyzed
//! window; fingerprints built from different fits are not comparable.
//!
//! Weighting: smooth idf `ln((1 + n) / (1 + df)) + 1`, raw term counts, then
//! L2 normalization per document. Vocabulary dimensions are sorted terms, so
//! transforms are deterministic.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::EngineError;

/// Tokens are lowercased runs of word characters, two characters or longer.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

fn tokenize(text: &str) -> Vec<String> {
  let lowered = text.to_lowercase();
  TOKEN.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// A fitted vectorizer: vocabulary plus per-term inverse document frequency.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
  vocab: Vec<String>,
  index: HashMap<String, usize>,
  idf: Vec<f64>,
}

impl TfidfVectorizer {
  /// Learn the vocabulary and idf weights from a message corpus.
  ///
  /// Fails only when the corpus is empty (zero commits); a corpus whose
  /// messages yield no tokens produces an empty vocabulary, and transforms
  /// then carry zero embedding dimensions.
  pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Result<Self, EngineError> {
    if corpus.is_empty() {
      return Err(EngineError::EmptyCorpus);
    }

    // BTreeMap keeps vocabulary dimensions in sorted term order.
    let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
    for doc in corpus {
      let distinct: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
      for term in distinct {
        *doc_freq.entry(term).or_insert(0) += 1;
      }
    }

    let n_docs = corpus.len() as f64;
    let mut vocab = Vec::with_capacity(doc_freq.len());
    let mut idf = Vec::with_capacity(doc_freq.len());
    for (term, df) in doc_freq {
      idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
      vocab.push(term);
    }
    let index = vocab
      .iter()
      .enumerate()
      .map(|(i, t)| (t.clone(), i))
      .collect();

    Ok(Self { vocab, index, idf })
  }

  /// Embed one message as a dense vector of vocabulary size. Unknown tokens
  /// are ignored; a message with no known tokens embeds as the zero vector.
  pub fn transform(&self, text: &str) -> Vec<f64> {
    let mut v = vec![0.0; self.vocab.len()];
    for token in tokenize(text) {
      if let Some(&i) = self.index.get(&token) {
        v[i] += self.idf[i];
      }
    }
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
      for x in &mut v {
        *x /= norm;
      }
    }
    v
  }

  pub fn vocabulary_len(&self) -> usize {
    self.vocab.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_corpus_is_an_error() {
    let corpus: Vec<&str> = vec![];
    assert!(matches!(
      TfidfVectorizer::fit(&corpus),
      Err(EngineError::EmptyCorpus)
    ));
  }

  #[test]
  fn vocabulary_is_sorted_and_deduplicated() {
    let v = TfidfVectorizer::fit(&["zebra apple", "apple mango"]).unwrap();
    assert_eq!(v.vocab, vec!["apple", "mango", "zebra"]);
  }

  #[test]
  fn single_character_tokens_are_dropped() {
    let v = TfidfVectorizer::fit(&["a b fix"]).unwrap();
    assert_eq!(v.vocabulary_len(), 1);
  }

  #[test]
  fn transform_is_l2_normalized() {
    let v = TfidfVectorizer::fit(&["fix parser bug", "add parser feature"]).unwrap();
    let e = v.transform("fix parser bug");
    let norm: f64 = e.iter().map(|x| x * x).sum::<f64>().sqrt();
    assert!((norm - 1.0).abs() < 1e-9);
  }

  #[test]
  fn rare_term_outweighs_ubiquitous_term() {
    // "parser" appears in both documents, "bug" in one; idf(bug) > idf(parser).
    let v = TfidfVectorizer::fit(&["fix parser bug", "add parser feature"]).unwrap();
    let e = v.transform("parser bug");
    let bug = e[v.index["bug"]];
    let parser = e[v.index["parser"]];
    assert!(bug > parser, "bug {} should outweigh parser {}", bug, parser);
  }

  #[test]
  fn unknown_tokens_embed_as_zero() {
    let v = TfidfVectorizer::fit(&["fix parser"]).unwrap();
    let e = v.transform("completely novel words");
    assert!(e.iter().all(|x| *x == 0.0));
  }

  #[test]
  fn transform_is_case_insensitive() {
    let v = TfidfVectorizer::fit(&["Fix Parser"]).unwrap();
    let a = v.transform("fix parser");
    let b = v.transform("FIX PARSER");
    assert_eq!(a, b);
    assert!(a.iter().any(|x| *x > 0.0));
  }
}
