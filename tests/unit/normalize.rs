//! Query normalization through the public API.

use djibly::normalize::SYNONYMS;
use djibly::{clean, normalize, synonym};

#[test]
fn test_punctuation_and_case() {
    assert_eq!(normalize("WiFi, Dar!!"), "wifi modem dar");
    assert_eq!(normalize("  Samsng   GALAXY?  "), "samsng galaxy");
}

#[test]
fn test_every_synonym_expands_after_itself() {
    for (from, to) in SYNONYMS {
        assert_eq!(normalize(from), format!("{} {}", from, to));
    }
}

#[test]
fn test_several_synonyms_in_one_query() {
    assert_eq!(normalize("kitman bezef"), "kitman ecouteurs bezef hayla");
    assert_eq!(normalize("verser storm"), "verser flexy storm flexy");
}

#[test]
fn test_synonyms_match_whole_tokens_only() {
    assert_eq!(normalize("internet"), "internet");
    assert_eq!(normalize("wifis"), "wifis");
    assert_eq!(normalize("net_2000"), "net_2000");
}

#[test]
fn test_empty_and_punctuation_only() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("?!.,;"), "");
}

#[test]
fn test_non_latin_scripts_survive() {
    assert_eq!(normalize("فليكسي 100!"), "فليكسي 100");
    assert_eq!(normalize("Légende"), "légende");
}

#[test]
fn test_vowelled_arabic_matches_bare_letters() {
    assert_eq!(normalize("مُحَمَّد"), "محمد");
    assert_eq!(normalize("مُحَمَّد"), normalize("محمد"));
}

#[test]
fn test_clean_keeps_inner_whitespace() {
    // Collapsing runs of spaces is the tokenizer's job, not clean's.
    assert_eq!(clean("a  b"), "a  b");
}

#[test]
fn test_synonym_lookup() {
    assert_eq!(synonym("wifi"), Some("modem"));
    assert_eq!(synonym("modem"), None);
    assert_eq!(synonym("WIFI"), None);
}
