// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring every catalog product against one query.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{DjiblyError, Result};
use crate::normalize::normalize;
use crate::pipeline::TrainedPipeline;
use crate::search::ranking::compare_ranked;
use crate::types::ScoredCandidate;

/// Rank the pipeline's own catalog.
pub fn rank(pipeline: &TrainedPipeline, query: &str, top_k: usize) -> Result<Vec<ScoredCandidate>> {
    rank_catalog(pipeline, pipeline.catalog(), query, top_k)
}

/// Rank `catalog` against `query`, returning at most `top_k` candidates.
///
/// Every product is scored. The result is sorted by descending score with
/// ties in catalog order, and is not filtered by any threshold.
pub fn rank_catalog(
    pipeline: &TrainedPipeline,
    catalog: &Catalog,
    query: &str,
    top_k: usize,
) -> Result<Vec<ScoredCandidate>> {
    if top_k == 0 {
        return Err(DjiblyError::Config("top_k must be at least 1".to_string()));
    }
    if catalog.is_empty() {
        return Ok(Vec::new());
    }

    let normalized = normalize(query);
    let mut scored = score_all(pipeline, catalog, &normalized);

    if top_k < scored.len() {
        // Ordering is total, so unstable selection is still deterministic.
        scored.select_nth_unstable_by(top_k - 1, compare_ranked);
        scored.truncate(top_k);
    }
    scored.sort_by(compare_ranked);

    debug!(
        query = %normalized,
        candidates = catalog.len(),
        returned = scored.len(),
        "ranked catalog"
    );

    let products = catalog.products();
    Ok(scored
        .into_iter()
        .map(|(position, score)| ScoredCandidate {
            product: products[position].clone(),
            score,
        })
        .collect())
}

fn score_all(pipeline: &TrainedPipeline, catalog: &Catalog, normalized: &str) -> Vec<(usize, f64)> {
    let products = catalog.products();
    #[cfg(feature = "parallel")]
    {
        products
            .par_iter()
            .enumerate()
            .map(|(i, p)| (i, pipeline.score_normalized(normalized, p.search_text())))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        products
            .iter()
            .enumerate()
            .map(|(i, p)| (i, pipeline.score_normalized(normalized, p.search_text())))
            .collect()
    }
}
