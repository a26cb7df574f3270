//! Saved pipelines score exactly like the ones that were saved.

use djibly::{inspect, load, scoring_string, train_with, TrainingConfig};

use crate::common::{sample_corpus, saved_artifact, SAMPLE_PIPELINE, TWO_PRODUCT_PIPELINE};

const HELD_OUT: [&str; 5] = ["kitman bezef", "puce 4g", "xyz", "", "Routeur wifi 2000 DA"];

#[test]
fn test_round_trip_scores_training_rows_identically() {
    let (_dir, path) = saved_artifact(&SAMPLE_PIPELINE);
    let loaded = load(&path).unwrap();

    for row in sample_corpus() {
        let text = row.product_text();
        assert_eq!(
            SAMPLE_PIPELINE.score(&row.query, &text).to_bits(),
            loaded.score(&row.query, &text).to_bits(),
            "{:?}",
            row.query
        );
    }
}

#[test]
fn test_round_trip_scores_unseen_queries_identically() {
    let (_dir, path) = saved_artifact(&SAMPLE_PIPELINE);
    let loaded = load(&path).unwrap();

    for query in HELD_OUT {
        for product in SAMPLE_PIPELINE.catalog() {
            let original = SAMPLE_PIPELINE.score(query, product.search_text());
            let restored = loaded.score(query, product.search_text());
            assert_eq!(original.to_bits(), restored.to_bits());
        }
    }
}

#[test]
fn test_round_trip_preserves_everything() {
    let (_dir, path) = saved_artifact(&TWO_PRODUCT_PIPELINE);
    let loaded = load(&path).unwrap();

    assert_eq!(loaded.catalog(), TWO_PRODUCT_PIPELINE.catalog());
    assert_eq!(loaded.model(), TWO_PRODUCT_PIPELINE.model());
    assert_eq!(loaded.vectorizer().vocabulary(), TWO_PRODUCT_PIPELINE.vectorizer().vocabulary());
    assert_eq!(loaded.vectorizer().ngram_range(), (2, 5));
    assert_eq!(loaded.fingerprint(), TWO_PRODUCT_PIPELINE.fingerprint());

    let text = scoring_string("internet 2000", "x");
    assert_eq!(loaded.features(&text), TWO_PRODUCT_PIPELINE.features(&text));
}

#[test]
fn test_custom_ngram_range_survives() {
    let config = TrainingConfig::builder().ngram_range(3, 4).build().unwrap();
    let (pipeline, _) = train_with(&sample_corpus(), &config).unwrap();
    let (_dir, path) = saved_artifact(&pipeline);

    let loaded = load(&path).unwrap();
    assert_eq!(loaded.vectorizer().ngram_range(), (3, 4));
    assert_eq!(loaded.fingerprint(), pipeline.fingerprint());
}

#[test]
fn test_inspect_reports_a_valid_artifact() {
    let (_dir, path) = saved_artifact(&SAMPLE_PIPELINE);
    let info = inspect(&path).unwrap();

    assert!(info.is_valid(), "{:?}", info.problem);
    assert_eq!(info.stored_crc32, Some(info.computed_crc32));
    assert_eq!(info.header.product_count, 6);
    assert_eq!(info.header.vocab_count as usize, SAMPLE_PIPELINE.vectorizer().len());
    assert_eq!(info.header.fingerprint, SAMPLE_PIPELINE.fingerprint());
    assert_eq!(info.offsets.total_size(), info.file_size);
}

#[test]
fn test_saving_twice_is_byte_identical() {
    let (_a, first) = saved_artifact(&SAMPLE_PIPELINE);
    let (_b, second) = saved_artifact(&SAMPLE_PIPELINE);
    assert_eq!(std::fs::read(first).unwrap(), std::fs::read(second).unwrap());
}
