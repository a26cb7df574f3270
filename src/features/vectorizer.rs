// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! TF-IDF over word-bounded character n-grams.
//!
//! `fit` sees the whole training set once, assigns every observed n-gram an
//! index (in sorted order, so two fits over the same corpus produce the same
//! feature space) and a smoothed inverse document frequency:
//!
//! ```text
//! idf(t) = ln((1 + n_docs) / (1 + df(t))) + 1
//! ```
//!
//! `transform` counts raw term frequencies, multiplies by idf and scales the
//! result to unit L2 norm. It never grows the vocabulary.

use std::collections::{BTreeMap, HashMap, HashSet};

use crc32fast::Hasher as Crc32Hasher;

use super::ngrams::char_wb_ngrams;
use super::sparse::SparseVector;
use crate::error::{DjiblyError, Result};

/// Fitted n-gram vocabulary plus IDF weights. Immutable after `fit`.
#[derive(Debug, Clone)]
pub struct NgramVectorizer {
    ngram_min: usize,
    ngram_max: usize,
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    lookup: HashMap<String, u32>,
}

impl NgramVectorizer {
    /// Learn the vocabulary and IDF weights from `corpus`.
    pub fn fit<I, S>(corpus: I, ngram_min: usize, ngram_max: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut doc_freq: HashMap<String, u32> = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut n_docs = 0usize;

        for doc in corpus {
            n_docs += 1;
            seen.clear();
            let lowered = doc.as_ref().to_lowercase();
            char_wb_ngrams(&lowered, ngram_min, ngram_max, |gram| {
                if !seen.contains(gram) {
                    seen.insert(gram.to_string());
                }
            });
            for gram in seen.drain() {
                *doc_freq.entry(gram).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<(String, u32)> = doc_freq.into_iter().collect();
        terms.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let n = n_docs as f64;
        let (vocabulary, idf): (Vec<String>, Vec<f64>) = terms
            .into_iter()
            .map(|(term, df)| (term, ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0))
            .unzip();

        Self::assemble(ngram_min, ngram_max, vocabulary, idf)
    }

    /// Rebuild a vectorizer from persisted parts, checking they are coherent.
    pub fn restore(
        ngram_min: usize,
        ngram_max: usize,
        vocabulary: Vec<String>,
        idf: Vec<f64>,
    ) -> Result<Self> {
        if ngram_min == 0 || ngram_min > ngram_max {
            return Err(DjiblyError::corrupt(format!(
                "invalid n-gram range {}..={}",
                ngram_min, ngram_max
            )));
        }
        if vocabulary.len() != idf.len() {
            return Err(DjiblyError::corrupt(format!(
                "vocabulary has {} terms but {} idf weights",
                vocabulary.len(),
                idf.len()
            )));
        }
        if let Some(pos) = vocabulary.windows(2).position(|w| w[0] >= w[1]) {
            return Err(DjiblyError::corrupt(format!(
                "vocabulary not strictly sorted at term {}",
                pos + 1
            )));
        }
        if let Some(pos) = idf.iter().position(|w| !(w.is_finite() && *w > 0.0)) {
            return Err(DjiblyError::corrupt(format!(
                "idf weight {} is not a positive finite number",
                pos
            )));
        }
        Ok(Self::assemble(ngram_min, ngram_max, vocabulary, idf))
    }

    fn assemble(ngram_min: usize, ngram_max: usize, vocabulary: Vec<String>, idf: Vec<f64>) -> Self {
        let lookup = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i as u32))
            .collect();
        Self {
            ngram_min,
            ngram_max,
            vocabulary,
            idf,
            lookup,
        }
    }

    /// Map `text` into the frozen feature space.
    pub fn transform(&self, text: &str) -> SparseVector {
        let lowered = text.to_lowercase();
        let mut counts: BTreeMap<u32, f64> = BTreeMap::new();
        char_wb_ngrams(&lowered, self.ngram_min, self.ngram_max, |gram| {
            if let Some(&index) = self.lookup.get(gram) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        });
        for (index, tf) in counts.iter_mut() {
            *tf *= self.idf[*index as usize];
        }
        let mut vector = SparseVector::from_map(counts);
        vector.normalize_l2();
        vector
    }

    /// Number of features (vocabulary size).
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        (self.ngram_min, self.ngram_max)
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Index of `term` in the feature space, if it was seen during `fit`.
    pub fn index_of(&self, term: &str) -> Option<u32> {
        self.lookup.get(term).copied()
    }

    /// CRC32 identifying this exact feature space.
    ///
    /// Scorer weights record the fingerprint of the vectorizer they were
    /// trained against; a mismatch means the pair came from different runs.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(&[self.ngram_min as u8, self.ngram_max as u8]);
        for (term, idf) in self.vocabulary.iter().zip(&self.idf) {
            hasher.update(term.as_bytes());
            // 0xFF never occurs in UTF-8, so it cannot be confused with term bytes.
            hasher.update(&[0xFF]);
            hasher.update(&idf.to_le_bytes());
        }
        hasher.finalize()
    }
}
