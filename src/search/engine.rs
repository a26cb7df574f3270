// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The long-lived search handle.
//!
//! `SearchEngine` owns at most one active [`TrainedPipeline`] behind an
//! `Arc`. A search clones the `Arc` under a read lock and scores against that
//! snapshot with the lock released, so a concurrent retrain or reload never
//! blocks in-flight searches and never shows them a half-swapped state.
//!
//! ```text
//!   search ──read──▶ RwLock<Option<Arc<TrainedPipeline>>> ◀──write── install
//!      │                        │
//!      └── Arc clone ◀──────────┘   (old snapshot lives until its last reader drops it)
//! ```

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::config::TrainingConfig;
use crate::error::{DjiblyError, Result};
use crate::pipeline::TrainedPipeline;
use crate::search::rank::rank;
use crate::store;
use crate::training::{train_with, TrainingSummary};
use crate::types::{LabeledExample, ScoredCandidate, SearchHit};

/// Thread-safe holder of the active pipeline.
#[derive(Default)]
pub struct SearchEngine {
    active: RwLock<Option<Arc<TrainedPipeline>>>,
}

impl SearchEngine {
    /// An engine with nothing loaded. Searches fail with
    /// [`DjiblyError::EngineNotReady`] until a pipeline is installed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pipeline(pipeline: TrainedPipeline) -> Self {
        let engine = Self::new();
        engine.install(pipeline);
        engine
    }

    /// Make `pipeline` the active snapshot, returning the one it replaced.
    pub fn install(&self, pipeline: TrainedPipeline) -> Option<Arc<TrainedPipeline>> {
        let next = Arc::new(pipeline);
        info!(
            products = next.catalog().len(),
            vocabulary = next.vectorizer().len(),
            "installed pipeline"
        );
        self.active.write().replace(next)
    }

    /// Train on `corpus` and install the result.
    ///
    /// On failure the previous snapshot stays active.
    pub fn train(&self, corpus: &[LabeledExample], config: &TrainingConfig) -> Result<TrainingSummary> {
        let (pipeline, summary) = train_with(corpus, config)?;
        self.install(pipeline);
        Ok(summary)
    }

    /// Load an artifact from disk and install it.
    ///
    /// On failure the previous snapshot stays active.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<()> {
        let pipeline = store::load(path)?;
        self.install(pipeline);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.active.read().is_some()
    }

    /// The active pipeline, shared.
    pub fn snapshot(&self) -> Result<Arc<TrainedPipeline>> {
        self.active
            .read()
            .as_ref()
            .map(Arc::clone)
            .ok_or(DjiblyError::EngineNotReady)
    }

    /// Top-k scored products for `query`, unfiltered.
    pub fn search_candidates(&self, query: &str, top_k: usize) -> Result<Vec<ScoredCandidate>> {
        let pipeline = self.snapshot()?;
        rank(&pipeline, query, top_k)
    }

    /// Top-k results for `query` in the shape presentation layers consume.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>> {
        Ok(self
            .search_candidates(query, top_k)?
            .into_iter()
            .map(SearchHit::from)
            .collect())
    }
}
