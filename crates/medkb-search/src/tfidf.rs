//! TF-IDF vectorizer over normalized Vietnamese text.
//!
//! Documents are analyzed into unigrams (and bigrams when `ngram_max == 2`)
//! after normalization and stopword removal. The vocabulary keeps the
//! `max_features` terms with the highest corpus frequency. Weights use the
//! smoothed IDF `ln((1 + n) / (1 + df)) + 1` and every vector is L2-normalized,
//! so cosine similarity reduces to a dot product.

use std::collections::{BTreeMap, HashMap};

use medkb_config::IndexConfig;

use crate::text;

/// Sparse vector as `(term index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Split text into index terms.
///
/// Tokens shorter than two characters and stopwords are dropped before
/// n-grams are formed.
#[must_use]
pub fn analyze(raw: &str, ngram_max: usize) -> Vec<String> {
    let normalized = text::normalize(raw);
    let tokens: Vec<&str> = normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2 && !text::is_stopword(t))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| (*t).to_string()).collect();
    if ngram_max >= 2 {
        terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    }
    terms
}

/// A fitted vocabulary with per-term IDF weights.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    ngram_max: usize,
}

impl TfidfVectorizer {
    /// Fit a vocabulary over `documents`.
    ///
    /// Returns `None` when the documents contain no indexable terms.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(documents: &[String], config: &IndexConfig) -> Option<Self> {
        let mut corpus_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = analyze(doc, config.ngram_max);
            let mut seen: Vec<&String> = Vec::new();
            for term in &terms {
                *corpus_counts.entry(term.clone()).or_insert(0) += 1;
                if !seen.contains(&term) {
                    seen.push(term);
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        if corpus_counts.is_empty() {
            return None;
        }

        let mut ranked: Vec<(String, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(config.max_features);

        // Alphabetical indices keep the layout independent of HashMap order.
        let vocabulary: BTreeMap<String, usize> = {
            let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
            terms.sort();
            terms.into_iter().enumerate().map(|(i, t)| (t, i)).collect()
        };

        let n = documents.len() as f64;
        let mut idf = vec![0.0; vocabulary.len()];
        for (term, &index) in &vocabulary {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            idf[index] = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
        }

        Some(Self {
            vocabulary,
            idf,
            ngram_max: config.ngram_max,
        })
    }

    /// Weight `raw` against the fitted vocabulary.
    ///
    /// Terms outside the vocabulary are ignored; text with no known terms
    /// yields an empty vector.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn transform(&self, raw: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for term in analyze(raw, self.ngram_max) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| (index, tf as f64 * self.idf[index]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }

    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    #[must_use]
    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }
}

/// Cosine similarity of two L2-normalized sparse vectors.
#[must_use]
pub fn cosine(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn analyze_emits_unigrams_then_bigrams() {
        let terms = analyze("Tăng huyết áp và tim", 2);
        assert_eq!(
            terms,
            vec!["tăng", "huyết", "áp", "tim", "tăng huyết", "huyết áp", "áp tim"]
        );
    }

    #[test]
    fn analyze_unigram_only() {
        assert_eq!(analyze("Đau đầu", 1), vec!["đau", "đầu"]);
    }

    #[test]
    fn fit_on_empty_corpus_is_none() {
        assert!(TfidfVectorizer::fit(&[], &IndexConfig::default()).is_none());
        assert!(TfidfVectorizer::fit(&docs(&["và của"]), &IndexConfig::default()).is_none());
    }

    #[test]
    fn vocabulary_is_capped_by_frequency() {
        let config = IndexConfig {
            max_features: 1,
            ngram_max: 1,
            ..IndexConfig::default()
        };
        let vectorizer =
            TfidfVectorizer::fit(&docs(&["sốt sốt ho", "sốt đau"]), &config).unwrap();
        assert_eq!(vectorizer.vocabulary_len(), 1);
        assert!(vectorizer.contains_term("sốt"));
    }

    #[test]
    fn vectors_are_unit_length() {
        let vectorizer = TfidfVectorizer::fit(
            &docs(&["tăng huyết áp", "cúm mùa lây lan"]),
            &IndexConfig::default(),
        )
        .unwrap();
        let v = vectorizer.transform("huyết áp cao");
        let norm: f64 = v.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_terms_give_empty_vector() {
        let vectorizer =
            TfidfVectorizer::fit(&docs(&["tăng huyết áp"]), &IndexConfig::default()).unwrap();
        assert!(vectorizer.transform("xyz abc").is_empty());
    }

    #[test]
    fn related_document_is_more_similar() {
        let corpus = docs(&["tăng huyết áp nguy hiểm", "cúm mùa lây lan nhanh"]);
        let vectorizer = TfidfVectorizer::fit(&corpus, &IndexConfig::default()).unwrap();
        let query = vectorizer.transform("huyết áp");
        let hypertension = vectorizer.transform(&corpus[0]);
        let flu = vectorizer.transform(&corpus[1]);
        assert!(cosine(&query, &hypertension) > cosine(&query, &flu));
        assert!(cosine(&query, &flu).abs() < f64::EPSILON);
    }
}
