// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stochastic gradient descent for L2-regularized logistic regression.
//!
//! One sample at a time, in an order reshuffled every epoch from a seeded
//! RNG, so the same corpus and seed always produce the same weights.
//!
//! # Learning rate
//!
//! The "optimal" schedule of Bottou's SGD: `eta_t = 1 / (alpha · (t0 + t))`,
//! with `t0` chosen from a typical weight magnitude so the first steps are
//! neither timid nor explosive.
//!
//! # Lazy L2 decay
//!
//! Shrinking every weight on every step would cost O(vocabulary) per sample.
//! Instead the weights are stored as `scale · raw`; decay multiplies `scale`,
//! and sparse updates divide by it. `scale` is folded back into `raw` when it
//! gets small enough to threaten precision.
//!
//! # Intercept
//!
//! The bias takes `SPARSE_INTERCEPT_DECAY` of each step, the usual treatment
//! for sparse design matrices.
//!
//! # Stopping
//!
//! Training stops once the summed epoch loss has failed to improve on the
//! best seen by more than `tol · n_samples` for `n_iter_no_change`
//! consecutive epochs, or after `max_epochs`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

use super::logistic::{log_loss, log_loss_gradient, LogisticModel};
use crate::config::TrainingConfig;
use crate::error::{DjiblyError, Result};
use crate::features::SparseVector;

/// Fold `scale` into the raw weights below this magnitude.
const MIN_SCALE: f64 = 1e-9;

/// Gradient clip, keeps a single pathological sample from blowing up.
const MAX_GRADIENT: f64 = 1e12;

/// Fraction of each step the intercept takes on sparse input.
pub const SPARSE_INTERCEPT_DECAY: f64 = 0.01;

/// How a fit went. Logged by the training pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    pub epochs: usize,
    /// Mean log-loss over the final epoch.
    pub final_loss: f64,
    /// `false` when `max_epochs` was hit before the stopping rule fired.
    pub converged: bool,
}

/// SGD trainer configured from [`TrainingConfig`].
#[derive(Debug, Clone)]
pub struct SgdTrainer {
    alpha: f64,
    max_epochs: usize,
    tol: f64,
    n_iter_no_change: usize,
    seed: u64,
}

impl SgdTrainer {
    pub fn new(config: &TrainingConfig) -> Self {
        Self {
            alpha: config.alpha,
            max_epochs: config.max_epochs,
            tol: config.tol,
            n_iter_no_change: config.n_iter_no_change,
            seed: config.seed,
        }
    }

    /// Fit weights for `n_features` features.
    ///
    /// Fails with [`DjiblyError::TrainingData`] when inputs are misaligned,
    /// empty, or carry a single class.
    pub fn fit(
        &self,
        features: &[SparseVector],
        labels: &[bool],
        n_features: usize,
        feature_fingerprint: u32,
    ) -> Result<(LogisticModel, FitReport)> {
        if features.len() != labels.len() {
            return Err(DjiblyError::TrainingData(format!(
                "{} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if features.is_empty() {
            return Err(DjiblyError::TrainingData("no samples to fit".to_string()));
        }
        let positives = labels.iter().filter(|&&l| l).count();
        if positives == 0 || positives == labels.len() {
            return Err(DjiblyError::TrainingData(format!(
                "need both relevant and irrelevant examples, got only label {}",
                u8::from(positives > 0)
            )));
        }

        let alpha = self.alpha;
        let typical_weight = (1.0 / alpha.sqrt()).sqrt();
        let optimal_init = 1.0 / (typical_weight * alpha);

        let mut raw = vec![0.0f64; n_features];
        let mut scale = 1.0f64;
        let mut intercept = 0.0f64;

        let mut order: Vec<usize> = (0..features.len()).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let n_samples = features.len() as f64;

        let mut t = 1.0f64;
        let mut best_loss = f64::INFINITY;
        let mut no_improvement = 0usize;
        let mut epochs = 0usize;
        let mut last_loss = 0.0f64;
        let mut converged = false;

        for epoch in 0..self.max_epochs {
            order.shuffle(&mut rng);
            let mut sum_loss = 0.0f64;

            for &i in &order {
                let x = &features[i];
                let y = if labels[i] { 1.0 } else { -1.0 };
                let margin = x.dot(&raw) * scale + intercept;
                let eta = 1.0 / (alpha * (optimal_init + t - 1.0));

                sum_loss += log_loss(margin, y);
                let gradient = log_loss_gradient(margin, y).clamp(-MAX_GRADIENT, MAX_GRADIENT);
                let update = -eta * gradient;

                scale *= (1.0 - eta * alpha).max(0.0);
                if scale < MIN_SCALE {
                    if scale == 0.0 {
                        raw.iter_mut().for_each(|w| *w = 0.0);
                    } else {
                        raw.iter_mut().for_each(|w| *w *= scale);
                    }
                    scale = 1.0;
                }

                if update != 0.0 {
                    for (j, v) in x.iter() {
                        if let Some(w) = raw.get_mut(j) {
                            *w += update * v / scale;
                        }
                    }
                    intercept += update * SPARSE_INTERCEPT_DECAY;
                }
                t += 1.0;
            }

            epochs = epoch + 1;
            last_loss = sum_loss / n_samples;
            debug!(epoch = epochs, mean_loss = last_loss, "sgd epoch");

            if sum_loss > best_loss - self.tol * n_samples {
                no_improvement += 1;
            } else {
                no_improvement = 0;
            }
            if sum_loss < best_loss {
                best_loss = sum_loss;
            }
            if no_improvement >= self.n_iter_no_change {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                epochs,
                mean_loss = last_loss,
                "sgd hit max_epochs before the loss stopped improving"
            );
        }

        let weights: Vec<f64> = raw.into_iter().map(|w| w * scale).collect();
        let model = LogisticModel::new(weights, intercept, feature_fingerprint);
        let report = FitReport {
            epochs,
            final_loss: last_loss,
            converged,
        };
        Ok((model, report))
    }
}
