// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records that flow through training and search.
//!
//! | Type              | Lifetime                 | Purpose                              |
//! |-------------------|--------------------------|--------------------------------------|
//! | `LabeledExample`  | loaded once, immutable   | One (query, product, label) row      |
//! | `ProductRecord`   | built per training run   | A searchable catalog entry           |
//! | `ScoredCandidate` | one search call          | A catalog entry with its probability |
//! | `SearchHit`       | one search call          | The row shape presentation layers use|
//!
//! # Invariants
//!
//! - **ProductRecord**: `search_text == name + " " + category + " " + description`.
//!   The text is derived in the constructor and never stored on disk, so it
//!   cannot drift from the rule the model was trained with.
//! - **ScoredCandidate**: `0.0 <= score <= 1.0`.

use serde::Serialize;

/// One labelled training row.
///
/// `relevance_label == 1` means the product fields are the right answer for
/// `user_query`; `0` means they were deliberately mismatched upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledExample {
    pub query: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub label: u8,
}

impl LabeledExample {
    pub fn is_relevant(&self) -> bool {
        self.label == 1
    }

    /// The product side of the training string, same rule as
    /// [`ProductRecord::search_text`].
    pub fn product_text(&self) -> String {
        product_text(&self.product_name, &self.category, &self.description)
    }
}

/// Concatenation rule shared by training and search.
///
/// Changing it shifts the feature space and invalidates every saved artifact.
pub fn product_text(name: &str, category: &str, description: &str) -> String {
    format!("{} {} {}", name, category, description)
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    search_text: String,
}

impl ProductRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        let name = name.into();
        let category = category.into();
        let description = description.into();
        let search_text = product_text(&name, &category, &description);
        Self {
            id: id.into(),
            name,
            category,
            description,
            price,
            search_text,
        }
    }

    /// The product fields of a training row.
    pub fn from_example(example: &LabeledExample) -> Self {
        Self::new(
            example.product_id.clone(),
            example.product_name.clone(),
            example.category.clone(),
            example.description.clone(),
            example.price,
        )
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }
}

/// A catalog entry scored against one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub product: ProductRecord,
    pub score: f64,
}

/// What presentation layers get back from a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub product_name: String,
    pub price: f64,
    pub score: f64,
    pub description: String,
}

impl From<&ScoredCandidate> for SearchHit {
    fn from(candidate: &ScoredCandidate) -> Self {
        Self {
            product_name: candidate.product.name.clone(),
            price: candidate.product.price,
            score: candidate.score,
            description: candidate.product.description.clone(),
        }
    }
}

impl From<ScoredCandidate> for SearchHit {
    fn from(candidate: ScoredCandidate) -> Self {
        Self {
            product_name: candidate.product.name,
            price: candidate.product.price,
            score: candidate.score,
            description: candidate.product.description,
        }
    }
}
