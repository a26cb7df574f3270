// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Training and search configuration.
//!
//! Defaults reproduce the hyper-parameters the shipped models were trained
//! with: char n-grams 2..=5, L2 strength 1e-4, seed 42. Changing the n-gram
//! range changes the feature space, so it is persisted in the artifact header.

use crate::error::{DjiblyError, Result};

/// Separator placed between the normalized query and the product text.
///
/// Training strings and scoring strings must use the same separator or the
/// learned n-gram weights stop lining up with what the model sees.
pub const FIELD_SEPARATOR: &str = " | ";

/// Longest n-gram length the artifact format accepts.
pub const MAX_NGRAM: usize = 16;

/// Hyper-parameters for [`crate::train`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Shortest character n-gram.
    pub ngram_min: usize,
    /// Longest character n-gram (inclusive).
    pub ngram_max: usize,
    /// L2 regularization strength.
    pub alpha: f64,
    /// Upper bound on SGD passes over the data.
    pub max_epochs: usize,
    /// Minimum loss improvement that counts as progress.
    pub tol: f64,
    /// Stop after this many epochs without progress.
    pub n_iter_no_change: usize,
    /// Seed for the per-epoch shuffle.
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            ngram_min: 2,
            ngram_max: 5,
            alpha: 1e-4,
            max_epochs: 1000,
            tol: 1e-3,
            n_iter_no_change: 5,
            seed: 42,
        }
    }
}

impl TrainingConfig {
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::default()
    }

    /// Check ranges. Called by the builder and again by `train`.
    pub fn validate(&self) -> Result<()> {
        if self.ngram_min == 0 || self.ngram_min > self.ngram_max {
            return Err(DjiblyError::Config(format!(
                "invalid n-gram range {}..={}",
                self.ngram_min, self.ngram_max
            )));
        }
        if self.ngram_max > MAX_NGRAM {
            return Err(DjiblyError::Config(format!(
                "ngram_max {} exceeds limit {}",
                self.ngram_max, MAX_NGRAM
            )));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(DjiblyError::Config(format!(
                "alpha must be positive, got {}",
                self.alpha
            )));
        }
        if self.max_epochs == 0 {
            return Err(DjiblyError::Config(
                "max_epochs must be greater than zero".to_string(),
            ));
        }
        if self.n_iter_no_change == 0 {
            return Err(DjiblyError::Config(
                "n_iter_no_change must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for a validated [`TrainingConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    pub fn ngram_range(mut self, min: usize, max: usize) -> Self {
        self.config.ngram_min = min;
        self.config.ngram_max = max;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    pub fn max_epochs(mut self, epochs: usize) -> Self {
        self.config.max_epochs = epochs;
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.config.tol = tol;
        self
    }

    pub fn n_iter_no_change(mut self, n: usize) -> Self {
        self.config.n_iter_no_change = n;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn build(self) -> Result<TrainingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Presentation-side search settings.
///
/// The engine itself only honours `top_k`; `threshold` is applied by callers
/// through [`crate::filter_confident`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub top_k: usize,
    pub threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            threshold: 0.2,
        }
    }
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

/// Builder for a validated [`SearchConfig`].
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Returns [`DjiblyError::Config`] if `top_k == 0` or the threshold is
    /// outside `[0, 1]`.
    pub fn build(self) -> Result<SearchConfig> {
        if self.config.top_k == 0 {
            return Err(DjiblyError::Config(
                "top_k must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.config.threshold) {
            return Err(DjiblyError::Config(format!(
                "threshold must be within [0, 1], got {}",
                self.config.threshold
            )));
        }
        Ok(self.config)
    }
}
