// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Logistic link and the fitted linear model.
//!
//! # Numerical stability
//!
//! `sigmoid` never evaluates `exp` of a large positive number: for negative
//! margins it uses `e^z / (1 + e^z)` instead of `1 / (1 + e^-z)`. Both forms
//! saturate cleanly, so very confident scores come out as 0.0 or 1.0 rather
//! than NaN.

use crate::features::SparseVector;

/// Logistic function, stable for any finite or infinite input. NaN maps to 0.5.
#[inline]
pub fn sigmoid(z: f64) -> f64 {
    if z.is_nan() {
        0.5
    } else if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Log-loss of margin `p` against a ±1 target, `ln(1 + e^(-y·p))`.
#[inline]
pub fn log_loss(p: f64, y: f64) -> f64 {
    let z = p * y;
    if z > 18.0 {
        (-z).exp()
    } else if z < -18.0 {
        -z
    } else {
        (-z).exp().ln_1p()
    }
}

/// Derivative of [`log_loss`] with respect to the margin.
#[inline]
pub(crate) fn log_loss_gradient(p: f64, y: f64) -> f64 {
    let z = p * y;
    if z > 18.0 {
        -y * (-z).exp()
    } else if z < -18.0 {
        -y
    } else {
        -y / (1.0 + z.exp())
    }
}

/// Trained linear relevance model.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    weights: Vec<f64>,
    intercept: f64,
    feature_fingerprint: u32,
}

impl LogisticModel {
    /// `feature_fingerprint` identifies the vectorizer the weights belong to.
    pub fn new(weights: Vec<f64>, intercept: f64, feature_fingerprint: u32) -> Self {
        Self {
            weights,
            intercept,
            feature_fingerprint,
        }
    }

    /// Raw margin `w·x + b`.
    pub fn decision(&self, features: &SparseVector) -> f64 {
        features.dot(&self.weights) + self.intercept
    }

    /// Probability that the candidate is relevant, always within `[0, 1]`.
    pub fn predict_proba(&self, features: &SparseVector) -> f64 {
        sigmoid(self.decision(features)).clamp(0.0, 1.0)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn feature_fingerprint(&self) -> u32 {
        self.feature_fingerprint
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }
}
