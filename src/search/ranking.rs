// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ordering and the confidence cut.
//!
//! Sort order:
//! 1. **Score**, higher first
//! 2. **Catalog position**, earlier first
//!
//! The second key makes the order total, so ranking does not depend on the
//! order the scores were computed in.

use std::cmp::Ordering;

use crate::types::{ScoredCandidate, SearchHit};

/// Compare two `(catalog_position, score)` pairs for ranking.
///
/// Scores are probabilities and never NaN; `total_cmp` keeps the comparison
/// total anyway.
#[inline]
pub fn compare_ranked(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Anything carrying a relevance probability.
pub trait Scored {
    fn score(&self) -> f64;
}

impl Scored for ScoredCandidate {
    fn score(&self) -> f64 {
        self.score
    }
}

impl Scored for SearchHit {
    fn score(&self) -> f64 {
        self.score
    }
}

/// Keep the results strictly above `threshold`, order unchanged.
pub fn filter_confident<T: Scored>(results: Vec<T>, threshold: f64) -> Vec<T> {
    results.into_iter().filter(|r| r.score() > threshold).collect()
}
