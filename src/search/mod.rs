// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: score every catalog product against a query and keep the best.
//!
//! ```text
//! query ──▶ normalize ──▶ for each product: query | search_text
//!                                 │
//!                      transform + predict_proba   (parallel)
//!                                 │
//!                  sort by score desc, catalog order on ties
//!                                 │
//!                            truncate top_k
//! ```
//!
//! The engine returns the top-k unfiltered. Deciding what counts as a
//! confident match is presentation policy; [`filter_confident`] is the
//! `score > threshold` rule the CLI uses.

mod engine;
mod rank;
pub mod ranking;

pub use engine::SearchEngine;
pub use rank::{rank, rank_catalog};
pub use ranking::{compare_ranked, filter_confident, Scored};
