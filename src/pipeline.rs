// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The trained pipeline: vectorizer, scorer and catalog from one training run.
//!
//! A `TrainedPipeline` is a plain immutable value. Nothing mutates it after
//! construction, so any number of threads can score against it through a
//! shared reference or `Arc`. Retraining builds a new one.

use crate::catalog::Catalog;
use crate::config::FIELD_SEPARATOR;
use crate::error::{DjiblyError, Result};
use crate::features::{NgramVectorizer, SparseVector};
use crate::normalize::normalize;
use crate::scoring::LogisticModel;

/// Build the string the model scores: normalized query, separator, product text.
pub fn scoring_string(normalized_query: &str, product_text: &str) -> String {
    let mut s = String::with_capacity(normalized_query.len() + FIELD_SEPARATOR.len() + product_text.len());
    s.push_str(normalized_query);
    s.push_str(FIELD_SEPARATOR);
    s.push_str(product_text);
    s
}

/// Vectorizer + scorer + catalog, guaranteed to come from the same run.
#[derive(Debug, Clone)]
pub struct TrainedPipeline {
    vectorizer: NgramVectorizer,
    model: LogisticModel,
    catalog: Catalog,
}

impl TrainedPipeline {
    /// Assemble a pipeline, rejecting a scorer that was trained against a
    /// different feature space than `vectorizer`.
    pub fn from_parts(vectorizer: NgramVectorizer, model: LogisticModel, catalog: Catalog) -> Result<Self> {
        if model.n_features() != vectorizer.len() {
            return Err(DjiblyError::corrupt(format!(
                "scorer has {} weights but vocabulary has {} features",
                model.n_features(),
                vectorizer.len()
            )));
        }
        let fingerprint = vectorizer.fingerprint();
        if model.feature_fingerprint() != fingerprint {
            return Err(DjiblyError::corrupt(format!(
                "scorer fingerprint {:08x} does not match vocabulary fingerprint {:08x}",
                model.feature_fingerprint(),
                fingerprint
            )));
        }
        Ok(Self {
            vectorizer,
            model,
            catalog,
        })
    }

    /// Feature vector for an already-built scoring string.
    pub fn features(&self, text: &str) -> SparseVector {
        self.vectorizer.transform(text)
    }

    /// Relevance probability of `product_text` for an already-normalized query.
    pub fn score_normalized(&self, normalized_query: &str, product_text: &str) -> f64 {
        let text = scoring_string(normalized_query, product_text);
        self.model.predict_proba(&self.vectorizer.transform(&text))
    }

    /// Relevance probability of `product_text` for a raw user query.
    pub fn score(&self, query: &str, product_text: &str) -> f64 {
        self.score_normalized(&normalize(query), product_text)
    }

    pub fn vectorizer(&self) -> &NgramVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &LogisticModel {
        &self.model
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fingerprint of the feature space shared by vectorizer and scorer.
    pub fn fingerprint(&self) -> u32 {
        self.model.feature_fingerprint()
    }
}
