// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Training: labelled corpus in, [`TrainedPipeline`] out.
//!
//! ```text
//! rows ──▶ normalize(query) + " | " + name category description
//!              │
//!              ├──▶ NgramVectorizer::fit ──▶ transform every row
//!              │                                   │
//!              │                      SgdTrainer::fit(features, labels)
//!              │
//!              └──▶ Catalog::from_examples (label = 1, first id wins)
//! ```
//!
//! The product side of each row is that row's own product fields, not the
//! catalog entry: negative rows pair a query with a mismatched product, and
//! that mismatch is exactly what the model learns from.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::TrainingConfig;
use crate::error::{DjiblyError, Result};
use crate::features::{NgramVectorizer, SparseVector};
use crate::normalize::normalize;
use crate::pipeline::{scoring_string, TrainedPipeline};
use crate::scoring::SgdTrainer;
use crate::types::LabeledExample;

/// What a training run saw and how the fit went.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub rows: usize,
    pub positives: usize,
    pub negatives: usize,
    pub vocabulary_size: usize,
    pub catalog_size: usize,
    pub epochs: usize,
    pub final_loss: f64,
    pub converged: bool,
}

/// Training string for one row.
pub fn training_string(example: &LabeledExample) -> String {
    scoring_string(&normalize(&example.query), &example.product_text())
}

fn transform_all(vectorizer: &NgramVectorizer, texts: &[String]) -> Vec<SparseVector> {
    #[cfg(feature = "parallel")]
    {
        texts.par_iter().map(|t| vectorizer.transform(t)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        texts.iter().map(|t| vectorizer.transform(t)).collect()
    }
}

/// Train with the default configuration.
pub fn train(corpus: &[LabeledExample]) -> Result<TrainedPipeline> {
    train_with(corpus, &TrainingConfig::default()).map(|(pipeline, _)| pipeline)
}

/// Train with an explicit configuration, returning the run summary too.
///
/// Fails with [`DjiblyError::DatasetEmpty`] on an empty corpus and
/// [`DjiblyError::TrainingData`] when all rows carry the same label.
pub fn train_with(
    corpus: &[LabeledExample],
    config: &TrainingConfig,
) -> Result<(TrainedPipeline, TrainingSummary)> {
    config.validate()?;
    if corpus.is_empty() {
        return Err(DjiblyError::DatasetEmpty);
    }

    let labels: Vec<bool> = corpus.iter().map(LabeledExample::is_relevant).collect();
    let positives = labels.iter().filter(|&&l| l).count();
    if positives == 0 || positives == corpus.len() {
        return Err(DjiblyError::TrainingData(format!(
            "corpus has only label {} rows ({} total)",
            u8::from(positives > 0),
            corpus.len()
        )));
    }

    info!(
        rows = corpus.len(),
        positives,
        negatives = corpus.len() - positives,
        "training relevance model"
    );

    let texts: Vec<String> = corpus.iter().map(training_string).collect();
    let vectorizer = NgramVectorizer::fit(&texts, config.ngram_min, config.ngram_max);
    let fingerprint = vectorizer.fingerprint();
    info!(
        vocabulary = vectorizer.len(),
        fingerprint = %format!("{:08x}", fingerprint),
        "fitted n-gram vocabulary"
    );

    let features = transform_all(&vectorizer, &texts);
    let (model, report) =
        SgdTrainer::new(config).fit(&features, &labels, vectorizer.len(), fingerprint)?;

    let catalog = Catalog::from_examples(corpus);
    info!(
        products = catalog.len(),
        epochs = report.epochs,
        mean_loss = report.final_loss,
        converged = report.converged,
        "training complete"
    );

    let summary = TrainingSummary {
        rows: corpus.len(),
        positives,
        negatives: corpus.len() - positives,
        vocabulary_size: vectorizer.len(),
        catalog_size: catalog.len(),
        epochs: report.epochs,
        final_loss: report.final_loss,
        converged: report.converged,
    };
    let pipeline = TrainedPipeline::from_parts(vectorizer, model, catalog)?;
    Ok((pipeline, summary))
}
