//! Normalization never fails and only ever adds canonical terms.

use djibly::{clean, normalize, synonym};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_clean_keeps_only_word_chars(raw in "\\PC{0,60}") {
        let cleaned = clean(&raw);
        prop_assert!(cleaned
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c.is_whitespace()));
    }

    #[cfg(feature = "unicode-normalization")]
    #[test]
    fn prop_clean_drops_combining_marks(raw in "[a-z\u{0621}-\u{064A}\u{064B}-\u{0652}\u{0300}-\u{036F} ]{0,40}") {
        let cleaned = clean(&raw);
        prop_assert!(!cleaned
            .chars()
            .any(unicode_normalization::char::is_combining_mark));
    }

    #[test]
    fn prop_normalized_tokens_are_single_spaced(raw in "\\PC{0,60}") {
        let normalized = normalize(&raw);
        prop_assert_eq!(normalized.trim(), normalized.as_str());
        prop_assert!(!normalized.contains("  "));
    }

    #[test]
    fn prop_expansion_only_inserts_canonical_forms(raw in "[a-zA-Z0-9 ,!?]{0,40}") {
        let cleaned = clean(&raw);
        let original: Vec<&str> = cleaned.split_whitespace().collect();
        let normalized = normalize(&raw);
        let tokens: Vec<&str> = normalized.split_whitespace().collect();

        let mut expected = Vec::new();
        for token in &original {
            expected.push(*token);
            if let Some(canonical) = synonym(token) {
                expected.push(canonical);
            }
        }
        prop_assert_eq!(tokens, expected);
    }

    #[test]
    fn prop_ascii_case_does_not_matter(raw in "[a-zA-Z0-9 ]{0,40}") {
        prop_assert_eq!(normalize(&raw), normalize(&raw.to_ascii_uppercase()));
    }
}
