// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word-bounded character n-gram extraction.
//!
//! Each whitespace token is padded with one space on both sides before
//! slicing, so " cat" (a word start) and "cat " (a word end) are different
//! features from the "cat" inside "category". Lengths are counted in
//! characters, not bytes, so Arabic and accented text slice cleanly.

/// Call `emit` for every n-gram of `text` with length in `min_n..=max_n`.
///
/// For a padded token shorter than `n` the whole padded token is emitted
/// once and longer lengths are skipped for that token, so short words do not
/// produce duplicate features.
pub fn char_wb_ngrams<F>(text: &str, min_n: usize, max_n: usize, mut emit: F)
where
    F: FnMut(&str),
{
    let mut padded = String::new();
    let mut bounds: Vec<usize> = Vec::new();

    for token in text.split_whitespace() {
        padded.clear();
        padded.push(' ');
        padded.push_str(token);
        padded.push(' ');

        // Char boundaries, plus the end of the string as a sentinel.
        bounds.clear();
        bounds.extend(padded.char_indices().map(|(i, _)| i));
        bounds.push(padded.len());
        let len = bounds.len() - 1;

        for n in min_n..=max_n {
            let mut offset = 0;
            emit(&padded[bounds[0]..bounds[n.min(len)]]);
            while offset + n < len {
                offset += 1;
                emit(&padded[bounds[offset]..bounds[offset + n]]);
            }
            if offset == 0 {
                break;
            }
        }
    }
}

/// Collect n-grams into owned strings. Convenience for tests and inspection.
pub fn collect_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let mut out = Vec::new();
    char_wb_ngrams(text, min_n, max_n, |gram| out.push(gram.to_string()));
    out
}
