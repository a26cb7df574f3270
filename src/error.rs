// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for training, persistence and search.
//!
//! Setup errors (`EngineNotReady`) and data errors (`DatasetEmpty`,
//! `TrainingData`) are kept apart from artifact errors so a caller can tell
//! "train first" from "the file on disk is damaged". `ArtifactNotFound` and
//! `ArtifactCorrupt` are never folded into each other: retraining over a
//! corrupt artifact is an operator decision, not something the core does.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the djibly core.
#[derive(Debug, Error)]
pub enum DjiblyError {
    /// The training corpus has zero usable rows.
    #[error("training corpus is empty")]
    DatasetEmpty,

    /// The labels cannot be fit (e.g. only one class present).
    #[error("invalid training data: {0}")]
    TrainingData(String),

    /// No artifact exists at the requested location.
    #[error("artifact not found: {}", path.display())]
    ArtifactNotFound {
        /// The location that was probed.
        path: PathBuf,
    },

    /// The artifact exists but failed structural validation.
    #[error("artifact is corrupt: {reason}")]
    ArtifactCorrupt {
        /// What the loader rejected.
        reason: String,
    },

    /// `search` was called before any pipeline was trained or loaded.
    #[error("search engine not ready: train or load a model first")]
    EngineNotReady,

    /// A corpus row could not be read or violates the schema.
    #[error("corpus error: {0}")]
    Corpus(String),

    /// A configuration value is out of range.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DjiblyError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        DjiblyError::ArtifactCorrupt {
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for DjiblyError {
    fn from(err: csv::Error) -> Self {
        DjiblyError::Corpus(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DjiblyError>;
