// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The candidate catalog: every product that is the right answer to at
//! least one training query.
//!
//! Built from the `label == 1` rows, deduplicated by product id with the
//! first occurrence winning, in first-seen order. That order is also the
//! ranking tie-break, so it has to be stable across runs and round-trips.

use std::collections::HashSet;

use crate::error::{DjiblyError, Result};
use crate::types::{LabeledExample, ProductRecord};

/// Ordered, id-unique collection of products. Replaced wholesale on retrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<ProductRecord>,
}

impl Catalog {
    /// Derive the catalog from labelled examples.
    pub fn from_examples(examples: &[LabeledExample]) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let products = examples
            .iter()
            .filter(|e| e.is_relevant())
            .filter(|e| seen.insert(e.product_id.as_str()))
            .map(ProductRecord::from_example)
            .collect();
        Self { products }
    }

    /// Wrap already-deduplicated records, rejecting duplicate ids.
    pub fn from_records(products: Vec<ProductRecord>) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(DjiblyError::corrupt(format!(
                    "duplicate product id '{}' in catalog",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductRecord> {
        self.products.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProductRecord;
    type IntoIter = std::slice::Iter<'a, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
