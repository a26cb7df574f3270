// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query normalization: lowercase, strip punctuation, expand synonyms.
//!
//! Users type in a mix of French, Darija and transliterated Arabic, with
//! brand nicknames and misspellings. The synonym table bridges the most
//! common of those to the vocabulary the catalog actually uses. Expansion is
//! additive: the original token stays, the canonical form follows it, so the
//! model still sees what the user typed.
//!
//! ```text
//! "Wifi, dar!"  →  "wifi modem dar"
//! "verser 500"  →  "verser flexy 500"
//! ```

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Dialect, brand and misspelling forms mapped to their canonical term.
///
/// Changing this table changes what the model sees at query time; retrain
/// after editing it.
pub const SYNONYMS: &[(&str, &str)] = &[
    ("kitman", "ecouteurs"),
    ("wifi", "modem"),
    ("net", "internet"),
    ("hbal", "hayla"),
    ("bezef", "hayla"),
    ("puce", "sim"),
    ("legende", "legend"),
    ("verser", "flexy"),
    ("storm", "flexy"),
];

/// Canonical form for `token`, if it has one.
pub fn synonym(token: &str) -> Option<&'static str> {
    SYNONYMS
        .iter()
        .find(|(from, _)| *from == token)
        .map(|(_, to)| *to)
}

/// Word characters survive cleaning: letters in any script, digits, `_`.
///
/// Combining marks are not word characters even where Unicode counts them
/// as alphabetic (Arabic harakat, Indic vowel signs).
#[inline]
fn is_word_char(c: char) -> bool {
    (c.is_alphanumeric() || c == '_') && !is_combining_mark(c)
}

#[cfg(feature = "unicode-normalization")]
#[inline]
fn is_combining_mark(c: char) -> bool {
    unicode_normalization::char::is_combining_mark(c)
}

/// Mark blocks for the scripts the catalog and its users write in.
#[cfg(not(feature = "unicode-normalization"))]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{0610}'..='\u{061A}' |
        '\u{064B}'..='\u{065F}' |
        '\u{0670}' |
        '\u{06D6}'..='\u{06DC}' |
        '\u{06DF}'..='\u{06E4}' |
        '\u{06E7}'..='\u{06E8}' |
        '\u{06EA}'..='\u{06ED}' |
        '\u{0900}'..='\u{0903}' |
        '\u{093A}'..='\u{093C}' |
        '\u{093E}'..='\u{094F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

/// Lowercase, trim, drop everything that is neither a word character nor
/// whitespace. Combining marks are dropped with the punctuation.
///
/// With the `unicode-normalization` feature the input is NFC-composed first,
/// so a decomposed "é" (e + U+0301) keeps its accent. Marks with no
/// precomposed form, such as Arabic short vowels, are still removed.
pub fn clean(raw: &str) -> String {
    #[cfg(feature = "unicode-normalization")]
    let composed: String = raw.nfc().collect();
    #[cfg(not(feature = "unicode-normalization"))]
    let composed = raw;

    composed
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect()
}

/// Normalize a raw query into the token stream the model was trained on.
///
/// Never fails: empty or punctuation-only input yields an empty string.
pub fn normalize(raw: &str) -> String {
    let cleaned = clean(raw);
    let mut expanded: Vec<&str> = Vec::new();

    for token in cleaned.split_whitespace() {
        expanded.push(token);
        if let Some(canonical) = synonym(token) {
            expanded.push(canonical);
        }
    }

    expanded.join(" ")
}
