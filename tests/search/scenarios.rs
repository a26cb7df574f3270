//! Queries users actually type, against products the model was trained on.

use djibly::{normalize, rank, rank_catalog, Catalog, ProductRecord, SearchEngine};

use crate::common::{names, SAMPLE_PIPELINE, TWO_PRODUCT_PIPELINE};

fn position(hits: &[djibly::ScoredCandidate], id: &str) -> usize {
    hits.iter()
        .position(|h| h.product.id == id)
        .unwrap_or_else(|| panic!("{} not ranked", id))
}

#[test]
fn test_internet_query_returns_internet_pack() {
    let engine = SearchEngine::with_pipeline(TWO_PRODUCT_PIPELINE.clone());
    let hits = engine.search("internet 2000", 1).unwrap();
    assert_eq!(names(&hits), vec!["Internet Pack 2000"]);
}

#[test]
fn test_music_query_ranks_music_first() {
    let hits = rank(&TWO_PRODUCT_PIPELINE, "music app", 2).unwrap();
    assert_eq!(hits[0].product.id, "SRV_ANG");
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn test_wifi_reaches_the_modem_through_its_synonym() {
    assert_eq!(normalize("wifi"), "wifi modem");

    let hits = rank(&SAMPLE_PIPELINE, "wifi", 6).unwrap();
    let modem = position(&hits, "MODEM");
    assert!(modem < position(&hits, "LEG_2000"));
    assert!(modem < position(&hits, "PHONE_SAM"));
}

#[test]
fn test_raw_and_normalized_queries_score_alike() {
    let pipeline = &*SAMPLE_PIPELINE;
    let modem = pipeline.catalog().get("MODEM").unwrap();
    let raw = pipeline.score("WiFi!!", modem.search_text());
    let normalized = pipeline.score_normalized("wifi modem", modem.search_text());
    assert_eq!(raw.to_bits(), normalized.to_bits());
}

#[test]
fn test_training_queries_prefer_their_product() {
    // Each fixture query was paired with products i+1 and i+3 as negatives.
    let cases = [
        ("internet 2000", "INT_2000", ["SRV_ANG", "LEG_2000"]),
        ("legende deux mille", "LEG_2000", ["FLEXY", "INT_2000"]),
        ("samsng galaxy", "PHONE_SAM", ["INT_2000", "MODEM"]),
        ("verser credit", "FLEXY", ["PHONE_SAM", "SRV_ANG"]),
    ];
    for (query, wanted, negatives) in cases {
        let hits = rank(&SAMPLE_PIPELINE, query, 6).unwrap();
        for negative in negatives {
            assert!(
                position(&hits, wanted) < position(&hits, negative),
                "{:?}: {} should outrank {}",
                query,
                wanted,
                negative
            );
        }
    }
}

#[test]
fn test_equal_scores_keep_catalog_order() {
    let twin = |id: &str| ProductRecord::new(id, "Modem 4G", "Maison", "Routeur sans fil", 6000.0);

    let forward = Catalog::from_records(vec![twin("A"), twin("B")]).unwrap();
    let hits = rank_catalog(&SAMPLE_PIPELINE, &forward, "modem", 2).unwrap();
    assert_eq!(hits[0].score.to_bits(), hits[1].score.to_bits());
    assert_eq!(hits[0].product.id, "A");

    let reversed = Catalog::from_records(vec![twin("B"), twin("A")]).unwrap();
    let hits = rank_catalog(&SAMPLE_PIPELINE, &reversed, "modem", 2).unwrap();
    assert_eq!(hits[0].product.id, "B");
}

#[test]
fn test_twin_products_truncate_to_the_earlier_one() {
    let twin = |id: &str| ProductRecord::new(id, "Flexy Recharge", "Service", "Rechargement", 100.0);
    let catalog = Catalog::from_records(vec![twin("FIRST"), twin("SECOND"), twin("THIRD")]).unwrap();
    let hits = rank_catalog(&SAMPLE_PIPELINE, &catalog, "flexy", 1).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].product.id, "FIRST");
}
