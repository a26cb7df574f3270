//! First run trains and saves; later runs load what was saved.

use std::fs;

use djibly::{load_or_train, DjiblyError, LoadOutcome, TrainingConfig};
use tempfile::TempDir;

use crate::common::{example_for, sample_corpus, two_product_corpus, write_corpus};

#[test]
fn test_trains_once_then_loads() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir, &sample_corpus());
    let artifact = dir.path().join("model.djb");
    let config = TrainingConfig::default();

    let (first, outcome) = load_or_train(&artifact, &corpus, &config).unwrap();
    match outcome {
        LoadOutcome::Trained(summary) => {
            assert_eq!(summary.rows, 90);
            assert_eq!(summary.positives, 30);
            assert_eq!(summary.catalog_size, 6);
        }
        LoadOutcome::Loaded => panic!("nothing to load on first run"),
    }
    assert!(artifact.exists());

    let (second, outcome) = load_or_train(&artifact, &corpus, &config).unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(second.fingerprint(), first.fingerprint());
    assert_eq!(second.catalog(), first.catalog());
}

#[test]
fn test_existing_artifact_wins_over_corpus() {
    let dir = TempDir::new().unwrap();
    let artifact = dir.path().join("model.djb");
    let small = write_corpus(&dir, &two_product_corpus());
    load_or_train(&artifact, &small, &TrainingConfig::default()).unwrap();

    // A different corpus on the second run is ignored while the artifact exists.
    fs::write(&small, crate::common::corpus_csv(&sample_corpus())).unwrap();
    let (pipeline, outcome) = load_or_train(&artifact, &small, &TrainingConfig::default()).unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(pipeline.catalog().len(), 2);
}

#[test]
fn test_corrupt_artifact_is_not_retrained() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir, &sample_corpus());
    let artifact = dir.path().join("model.djb");
    fs::write(&artifact, b"DJBY but not really an artifact").unwrap();

    let err = load_or_train(&artifact, &corpus, &TrainingConfig::default()).unwrap_err();
    assert!(matches!(err, DjiblyError::ArtifactCorrupt { .. }));
    assert_eq!(fs::read(&artifact).unwrap(), b"DJBY but not really an artifact");
}

#[test]
fn test_missing_corpus_is_reported() {
    let dir = TempDir::new().unwrap();
    let artifact = dir.path().join("model.djb");
    let err = load_or_train(&artifact, dir.path().join("absent.csv"), &TrainingConfig::default())
        .unwrap_err();
    assert!(matches!(err, DjiblyError::Io(_)));
    assert!(!artifact.exists());
}

#[test]
fn test_single_class_corpus_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir, &[example_for("modem", 2, 1), example_for("flexy", 4, 1)]);
    let artifact = dir.path().join("model.djb");
    let err = load_or_train(&artifact, &corpus, &TrainingConfig::default()).unwrap_err();
    assert!(matches!(err, DjiblyError::TrainingData(_)));
    assert!(!artifact.exists());
}
