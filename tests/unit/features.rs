//! TF-IDF vectorizer behavior on small hand-checked corpora.

use djibly::features::ngrams::collect_ngrams;
use djibly::NgramVectorizer;

fn fit(texts: &[&str]) -> NgramVectorizer {
    NgramVectorizer::fit(texts.iter().copied(), 2, 3)
}

#[test]
fn test_vocabulary_is_sorted_and_unique() {
    let v = fit(&["ab ba", "ab"]);
    let vocab = v.vocabulary();
    assert!(vocab.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(vocab, [" a", " ab", " b", " ba", "a ", "ab", "ab ", "b ", "ba", "ba "]);
}

#[test]
fn test_smooth_idf() {
    // Two documents; " a" in both, " b" in one.
    let v = fit(&["ab ba", "ab"]);
    let idf = |term: &str| v.idf()[v.index_of(term).unwrap() as usize];
    assert!((idf(" a") - 1.0).abs() < 1e-12);
    assert!((idf(" b") - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
}

#[test]
fn test_transform_is_l2_normalized() {
    let v = fit(&["internet pack", "music streaming"]);
    let x = v.transform("internet music");
    assert!((x.l2_norm() - 1.0).abs() < 1e-12);
}

#[test]
fn test_unknown_text_is_zero_vector() {
    let v = fit(&["internet pack"]);
    assert!(v.transform("zzz qqq").is_zero());
    assert!(v.transform("").is_zero());
}

#[test]
fn test_transform_lowercases() {
    let v = fit(&["modem 4g"]);
    assert_eq!(v.transform("MODEM 4G"), v.transform("modem 4g"));
}

#[test]
fn test_repeated_terms_raise_weight() {
    let v = fit(&["ab cd", "ab"]);
    let once = v.transform("ab cd");
    let twice = v.transform("ab ab cd");
    let ab = v.index_of("ab").unwrap();
    let weight = |x: &djibly::SparseVector| {
        x.iter().find(|(i, _)| *i == ab as usize).map(|(_, w)| w).unwrap()
    };
    assert!(weight(&twice) > weight(&once));
}

#[test]
fn test_ngrams_respect_word_boundaries() {
    let grams = collect_ngrams("pack 2000", 2, 5);
    assert!(grams.contains(&" pack ".to_string()));
    assert!(!grams.iter().any(|g| g.contains("k 2")));
}

#[test]
fn test_fingerprint_tracks_feature_space() {
    let a = fit(&["internet pack"]);
    let b = fit(&["internet pack"]);
    let c = fit(&["internet box"]);
    let wider = NgramVectorizer::fit(["internet pack"], 2, 4);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
    assert_ne!(a.fingerprint(), wider.fingerprint());
}
