//! Ranking output shape, scoring bounds and catalog dedup over random inputs.

use djibly::{filter_confident, rank, Catalog, LabeledExample};
use proptest::prelude::*;

use crate::common::{example, SAMPLE_PIPELINE};

fn rows_strategy() -> impl Strategy<Value = Vec<(u8, bool)>> {
    prop::collection::vec((0u8..6, any::<bool>()), 0..40)
}

fn build_rows(layout: &[(u8, bool)]) -> Vec<LabeledExample> {
    layout.iter()
        .enumerate()
        .map(|(i, (id, relevant))| {
            let mut row = example("q", &format!("P{}", id), &format!("name {}", i), u8::from(*relevant));
            row.price = i as f64;
            row
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rank_is_sorted_and_bounded(query in "[a-z0-9 ]{0,30}", k in 1usize..10) {
        let pipeline = &*SAMPLE_PIPELINE;
        let results = rank(pipeline, &query, k).unwrap();

        prop_assert_eq!(results.len(), k.min(pipeline.catalog().len()));
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for r in &results {
            prop_assert!((0.0..=1.0).contains(&r.score));
        }
    }

    #[test]
    fn prop_top_k_is_a_prefix_of_the_full_ranking(query in "[a-z ]{0,20}", k in 1usize..6) {
        let pipeline = &*SAMPLE_PIPELINE;
        let all = rank(pipeline, &query, pipeline.catalog().len()).unwrap();
        let top = rank(pipeline, &query, k).unwrap();
        prop_assert_eq!(&top[..], &all[..top.len()]);
    }

    #[test]
    fn prop_filter_keeps_order_and_strictly_greater(query in "[a-z ]{0,20}", threshold in 0.0f64..1.0) {
        let hits = rank(&SAMPLE_PIPELINE, &query, 6).unwrap();
        let kept = filter_confident(hits.clone(), threshold);
        let expected: Vec<_> = hits.into_iter().filter(|h| h.score > threshold).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn prop_catalog_is_first_seen_positive_ids(layout in rows_strategy()) {
        let rows = build_rows(&layout);
        let catalog = Catalog::from_examples(&rows);

        let mut expected: Vec<&LabeledExample> = Vec::new();
        for row in rows.iter().filter(|r| r.label == 1) {
            if !expected.iter().any(|e| e.product_id == row.product_id) {
                expected.push(row);
            }
        }

        prop_assert_eq!(catalog.len(), expected.len());
        for (product, row) in catalog.iter().zip(&expected) {
            prop_assert_eq!(&product.id, &row.product_id);
            prop_assert_eq!(&product.name, &row.product_name);
        }
    }
}
