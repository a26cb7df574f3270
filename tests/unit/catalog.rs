//! Catalog derivation from trained corpora.

use djibly::{train, Catalog, ProductRecord};

use crate::common::{example, example_for, sample_corpus, PRODUCTS, SAMPLE_PIPELINE};

#[test]
fn test_catalog_follows_first_positive_order() {
    let ids: Vec<&str> = SAMPLE_PIPELINE.catalog().iter().map(|p| p.id.as_str()).collect();
    let expected: Vec<&str> = PRODUCTS.iter().map(|p| p.0).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_negative_only_products_are_not_searchable() {
    let mut rows = sample_corpus();
    rows.push(example("chaussures", "SHOES", "Chaussures Sport", 0));
    let pipeline = train(&rows).unwrap();
    assert!(pipeline.catalog().get("SHOES").is_none());
    assert_eq!(pipeline.catalog().len(), PRODUCTS.len());
}

#[test]
fn test_duplicate_ids_keep_first_fields() {
    let mut renamed = example_for("box", 2, 1);
    renamed.product_name = "Modem Renamed".to_string();
    renamed.price = 1.0;
    let rows = vec![
        example_for("modem", 2, 1),
        renamed,
        example_for("modem", 0, 0),
    ];
    let catalog = Catalog::from_examples(&rows);
    assert_eq!(catalog.len(), 1);
    let modem = catalog.get("MODEM").unwrap();
    assert_eq!(modem.name, "Modem 4G");
    assert!((modem.price - 6000.0).abs() < f64::EPSILON);
}

#[test]
fn test_search_text_joins_fields() {
    let record = ProductRecord::new("MODEM", "Modem 4G", "Maison", "Routeur sans fil", 6000.0);
    assert_eq!(record.search_text(), "Modem 4G Maison Routeur sans fil");
}

#[test]
fn test_records_and_examples_agree() {
    let row = example_for("modem", 2, 1);
    let record = ProductRecord::from_example(&row);
    assert_eq!(record.search_text(), row.product_text());
}
