// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character n-gram features: the model's view of a (query, product) pair.
//!
//! Word-bounded character n-grams soak up typos ("samsng"), truncations
//! ("legen") and plurals without a stemmer. The vocabulary and IDF weights
//! are fit once on the training strings and frozen; at query time unseen
//! n-grams simply contribute nothing.
//!
//! ```text
//! text ──lowercase──▶ tokens ──pad " tok "──▶ n-grams (2..=5)
//!                                                │
//!                       frozen vocabulary ◀──────┘
//!                                │
//!                     tf × idf, L2-normalized ──▶ SparseVector
//! ```

pub mod ngrams;
pub mod sparse;
pub mod vectorizer;

pub use ngrams::char_wb_ngrams;
pub use sparse::SparseVector;
pub use vectorizer::NgramVectorizer;
