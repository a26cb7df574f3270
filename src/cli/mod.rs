// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the djibly command-line interface.
//!
//! Four subcommands: `train` to fit a model from a labelled CSV corpus,
//! `search` to query a saved artifact, `demo` to run the stock demo queries,
//! and `inspect` to examine an artifact file. `-v`/`-vv` raise log verbosity
//! on top of whatever `DJIBLY_LOG` asks for.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use djibly::TrainingConfig;

#[derive(Parser)]
#[command(
    name = "djibly",
    about = "Relevance-ranked product search for noisy shopping queries",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train a model from a labelled CSV corpus and save it
    Train {
        /// CSV with product_id, product_name, category, description, price,
        /// user_query and relevance_label columns
        #[arg(short, long)]
        corpus: PathBuf,

        /// Artifact file to write
        #[arg(short, long, default_value = "djibly.djb")]
        output: PathBuf,

        #[command(flatten)]
        training: TrainingArgs,
    },

    /// Search a saved artifact
    Search {
        /// Artifact file
        artifact: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Only show results scoring strictly above this probability
        #[arg(short, long, default_value = "0.2")]
        threshold: f64,

        /// Print results as JSON (unfiltered by threshold)
        #[arg(long)]
        json: bool,
    },

    /// Run the stock demo queries against an artifact
    Demo {
        /// Artifact file
        #[arg(default_value = "djibly.djb")]
        artifact: PathBuf,

        /// Train from this corpus and save when the artifact does not exist
        #[arg(short, long)]
        corpus: Option<PathBuf>,

        /// Only show results scoring strictly above this probability
        #[arg(short, long, default_value = "0.2")]
        threshold: f64,
    },

    /// Inspect an artifact file structure
    Inspect {
        /// Path to artifact file
        file: PathBuf,
    },
}

/// Training hyper-parameters, defaulting to [`TrainingConfig::default`].
#[derive(Args, Debug, Clone)]
pub struct TrainingArgs {
    /// Shortest character n-gram
    #[arg(long, default_value = "2")]
    pub ngram_min: usize,

    /// Longest character n-gram
    #[arg(long, default_value = "5")]
    pub ngram_max: usize,

    /// L2 regularization strength
    #[arg(long, default_value = "0.0001")]
    pub alpha: f64,

    /// Maximum passes over the corpus
    #[arg(long, default_value = "1000")]
    pub max_epochs: usize,

    /// Shuffle seed
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

impl TrainingArgs {
    pub fn to_config(&self) -> djibly::Result<TrainingConfig> {
        TrainingConfig::builder()
            .ngram_range(self.ngram_min, self.ngram_max)
            .alpha(self.alpha)
            .max_epochs(self.max_epochs)
            .seed(self.seed)
            .build()
    }
}

/// The queries the original demo script ran.
pub const DEMO_QUERIES: [&str; 5] = [
    "internet 2000",
    "legende deux mille",
    "samsng galaxy",
    "verser credit",
    "wifi dar",
];
