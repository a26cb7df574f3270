// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sparse feature vectors.
//!
//! A scoring string touches a few hundred n-grams out of a vocabulary of tens
//! of thousands, so vectors are stored as parallel (index, value) arrays
//! sorted by index.

use std::collections::BTreeMap;

/// Sparse vector over the frozen vocabulary. Indices are strictly increasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f64>,
}

impl SparseVector {
    /// The all-zero vector (what pure out-of-vocabulary text maps to).
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from an index → value map, dropping explicit zeros.
    pub fn from_map(entries: BTreeMap<u32, f64>) -> Self {
        let mut indices = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            if value != 0.0 {
                indices.push(index);
                values.push(value);
            }
        }
        Self { indices, values }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .zip(self.values.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    /// Dot product with a dense weight vector. Indices past the end of
    /// `dense` contribute zero.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.iter()
            .map(|(i, v)| dense.get(i).map_or(0.0, |w| w * v))
            .sum()
    }

    pub fn l2_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit L2 norm. The zero vector stays zero.
    pub fn normalize_l2(&mut self) {
        let norm = self.l2_norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }
}
