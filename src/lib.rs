//! Query-to-product relevance ranking for mixed French, Darija and
//! transliterated Arabic shopping queries.
//!
//! A labelled corpus of (query, product, relevant?) rows trains a character
//! n-gram TF-IDF vectorizer and a logistic scorer. At search time every
//! catalog product is paired with the normalized query, scored, and the best
//! `top_k` come back in descending order.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ normalize.rs │───▶│  features/   │───▶│  scoring/    │
//! │ (clean,      │    │ (char_wb     │    │ (logistic,   │
//! │  synonyms)   │    │  n-grams,    │    │  SGD fit)    │
//! └──────────────┘    │  TF-IDF)     │    └──────────────┘
//!                     └──────────────┘           │
//!        corpus.rs ──▶ training.rs ──▶ pipeline.rs (vectorizer + model + catalog)
//!                                                │
//!                           ┌────────────────────┼───────────────────┐
//!                           ▼                    ▼                   ▼
//!                      search/              store.rs            catalog.rs
//!               (rank, SearchEngine)   (binary/ artifact)
//! ```
//!
//! # Modules
//!
//! | Module       | Role                                                |
//! |--------------|-----------------------------------------------------|
//! | `normalize`  | Cleaning and synonym expansion                      |
//! | `features`   | `char_wb` n-grams, sparse vectors, TF-IDF           |
//! | `scoring`    | Logistic model and its SGD trainer                  |
//! | `training`   | Corpus in, `TrainedPipeline` out                    |
//! | `catalog`    | Deduplicated positive products                      |
//! | `search`     | Ranking and the snapshot-holding `SearchEngine`     |
//! | `binary`     | Artifact byte format                                |
//! | `store`      | Atomic save, load, train-or-load, inspect           |
//!
//! # Usage
//!
//! ```no_run
//! use djibly::{load_corpus, train, SearchEngine};
//!
//! let corpus = load_corpus("data/corpus.csv")?;
//! let engine = SearchEngine::with_pipeline(train(&corpus)?);
//! for hit in engine.search("wifi dar", 5)? {
//!     println!("{} {:.2}", hit.product_name, hit.score);
//! }
//! # Ok::<(), djibly::DjiblyError>(())
//! ```

pub mod binary;
pub mod catalog;
pub mod config;
pub mod corpus;
pub mod error;
pub mod features;
pub mod normalize;
pub mod pipeline;
pub mod scoring;
pub mod search;
pub mod store;
pub mod training;
pub mod types;

#[doc(hidden)]
pub mod testing;

pub use catalog::Catalog;
pub use config::{SearchConfig, TrainingConfig, FIELD_SEPARATOR};
pub use corpus::{load_corpus, read_corpus};
pub use error::{DjiblyError, Result};
pub use features::{NgramVectorizer, SparseVector};
pub use normalize::{clean, normalize, synonym};
pub use pipeline::{scoring_string, TrainedPipeline};
pub use scoring::{LogisticModel, SgdTrainer};
pub use search::{filter_confident, rank, rank_catalog, SearchEngine};
pub use store::{inspect, load, load_or_train, save, ArtifactInfo, LoadOutcome};
pub use training::{train, train_with, TrainingSummary};
pub use types::{LabeledExample, ProductRecord, ScoredCandidate, SearchHit};
