// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Relevance scoring: a logistic model over n-gram features.
//!
//! The model answers one question per candidate: how likely is it that this
//! product is what the user meant? Training is plain SGD on log-loss with an
//! L2 penalty; inference is a sparse dot product through the logistic link.

pub mod logistic;
pub mod sgd;

pub use logistic::{log_loss, sigmoid, LogisticModel};
pub use sgd::{FitReport, SgdTrainer};
