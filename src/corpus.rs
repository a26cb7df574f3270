// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading the labelled training corpus.
//!
//! The corpus generators emit one CSV row per (query, product, label) with a
//! header line. Column order does not matter and extra columns are ignored.
//! Blank text cells read as empty strings, since the generators sometimes
//! leave descriptions out.
//!
//! Required columns: `product_id, product_name, category, description,
//! price, user_query, relevance_label`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{DjiblyError, Result};
use crate::types::LabeledExample;

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "product_id",
    "product_name",
    "category",
    "description",
    "price",
    "user_query",
    "relevance_label",
];

#[derive(Deserialize)]
struct CorpusRow {
    product_id: String,
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    price: f64,
    #[serde(default)]
    user_query: Option<String>,
    relevance_label: f64,
}

impl CorpusRow {
    fn into_example(self, line: usize) -> Result<LabeledExample> {
        let label = if self.relevance_label == 1.0 {
            1
        } else if self.relevance_label == 0.0 {
            0
        } else {
            return Err(DjiblyError::Corpus(format!(
                "row {}: relevance_label must be 0 or 1, got {}",
                line, self.relevance_label
            )));
        };
        if !(self.price.is_finite() && self.price >= 0.0) {
            return Err(DjiblyError::Corpus(format!(
                "row {}: price must be a non-negative number, got {}",
                line, self.price
            )));
        }
        Ok(LabeledExample {
            query: self.user_query.unwrap_or_default(),
            product_id: self.product_id,
            product_name: self.product_name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: self.price,
            label,
        })
    }
}

/// Parse a corpus from any reader.
pub fn read_corpus<R: Read>(reader: R) -> Result<Vec<LabeledExample>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(DjiblyError::Corpus(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut examples = Vec::new();
    for (i, row) in csv_reader.deserialize::<CorpusRow>().enumerate() {
        // Line 1 is the header.
        let line = i + 2;
        let row = row.map_err(|e| DjiblyError::Corpus(format!("row {}: {}", line, e)))?;
        examples.push(row.into_example(line)?);
    }
    Ok(examples)
}

/// Load a corpus file. A missing file is an [`DjiblyError::Io`] error.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<LabeledExample>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let examples = read_corpus(file)?;
    info!(path = %path.display(), rows = examples.len(), "loaded training corpus");
    Ok(examples)
}
