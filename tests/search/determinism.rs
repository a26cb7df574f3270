//! Same inputs, same bytes out.

use djibly::{rank, train, SearchEngine};

use crate::common::{sample_corpus, saved_artifact, SAMPLE_PIPELINE};

const QUERIES: [&str; 6] = [
    "internet 2000",
    "legende deux mille",
    "samsng galaxy",
    "verser credit",
    "wifi dar",
    "",
];

#[test]
fn test_repeated_searches_are_identical() {
    let engine = SearchEngine::with_pipeline(SAMPLE_PIPELINE.clone());
    for query in QUERIES {
        let first = engine.search(query, 5).unwrap();
        for _ in 0..3 {
            assert_eq!(engine.search(query, 5).unwrap(), first);
        }
    }
}

#[test]
fn test_independent_training_runs_rank_identically() {
    let other = train(&sample_corpus()).unwrap();
    for query in QUERIES {
        let a = rank(&SAMPLE_PIPELINE, query, 6).unwrap();
        let b = rank(&other, query, 6).unwrap();
        let bits = |hits: &[djibly::ScoredCandidate]| {
            hits.iter()
                .map(|h| (h.product.id.clone(), h.score.to_bits()))
                .collect::<Vec<_>>()
        };
        assert_eq!(bits(&a[..]), bits(&b[..]), "{:?}", query);
    }
}

#[test]
fn test_loaded_engine_matches_trained_engine() {
    let (_dir, path) = saved_artifact(&SAMPLE_PIPELINE);
    let loaded = SearchEngine::new();
    loaded.load(&path).unwrap();
    let trained = SearchEngine::with_pipeline(SAMPLE_PIPELINE.clone());
    for query in QUERIES {
        assert_eq!(loaded.search(query, 6).unwrap(), trained.search(query, 6).unwrap());
    }
}
