//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures so every test trains on the same catalog.

#![doc(hidden)]

use crate::types::LabeledExample;

/// Fixture products: (id, name, category, description, price).
pub const PRODUCTS: &[(&str, &str, &str, &str, f64)] = &[
    ("INT_2000", "Internet Pack 2000", "Internet", "Forfait internet mensuel 60Go", 2000.0),
    ("SRV_ANG", "Music Streaming", "Service", "Streaming musical sans pub", 0.0),
    ("MODEM", "Modem 4G", "Maison", "Routeur sans fil", 6000.0),
    ("LEG_2000", "Djezzy Legend 2000", "Mobile", "Appels illimites et 70Go data", 2000.0),
    ("FLEXY", "Flexy Recharge", "Service", "Rechargement de credit instantane", 100.0),
    ("PHONE_SAM", "Samsung Galaxy A15", "Smartphone", "Telephone Android 128Go", 32000.0),
];

/// Queries users type for each fixture product, same order as [`PRODUCTS`].
pub const QUERIES: &[&[&str]] = &[
    &["internet 2000", "net 2000", "pack internet", "connexion internet mois", "internet 60go"],
    &["music app", "musique streaming", "chanson mp3", "music", "streaming sans pub"],
    &["modem", "modem 4g", "routeur maison", "box maison", "routeur sans fil"],
    &["legende deux mille", "legend 2000", "djezzy legend", "legende", "appels illimites"],
    &["verser credit", "flexy", "recharge credit", "storm 100", "rechargement"],
    &["samsung galaxy", "samsng galaxy", "telephone android", "galaxy a15", "smartphone samsung"],
];

/// Build a labelled row. Category, description and price come from
/// [`PRODUCTS`] when `id` is a fixture product.
pub fn example(query: &str, id: &str, name: &str, label: u8) -> LabeledExample {
    let (category, description, price) = PRODUCTS
        .iter()
        .find(|p| p.0 == id)
        .map(|p| (p.2.to_string(), p.3.to_string(), p.4))
        .unwrap_or_else(|| ("Divers".to_string(), String::new(), 0.0));
    LabeledExample {
        query: query.to_string(),
        product_id: id.to_string(),
        product_name: name.to_string(),
        category,
        description,
        price,
        label,
    }
}

/// Row pairing `query` with fixture product `index`.
pub fn example_for(query: &str, index: usize, label: u8) -> LabeledExample {
    let (id, name, ..) = PRODUCTS[index];
    example(query, id, name, label)
}

/// Every query paired with its product (label 1) and with two mismatched
/// products (label 0), the way the corpus generators build negatives.
pub fn sample_corpus() -> Vec<LabeledExample> {
    let n = PRODUCTS.len();
    let mut rows = Vec::new();
    for (i, queries) in QUERIES.iter().enumerate() {
        for query in queries.iter() {
            rows.push(example_for(query, i, 1));
            rows.push(example_for(query, (i + 1) % n, 0));
            rows.push(example_for(query, (i + 3) % n, 0));
        }
    }
    rows
}

/// Two products, one query each, with their mismatched pairs.
pub fn two_product_corpus() -> Vec<LabeledExample> {
    vec![
        example_for("internet 2000", 0, 1),
        example_for("music app", 1, 1),
        example_for("internet 2000", 1, 0),
        example_for("music app", 0, 0),
    ]
}
