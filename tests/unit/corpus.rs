//! Corpus files on disk.

use djibly::{load_corpus, read_corpus, DjiblyError};
use tempfile::TempDir;

use crate::common::{corpus_csv, example, sample_corpus, write_corpus, CSV_HEADER};

#[test]
fn test_written_corpus_reads_back() {
    let dir = TempDir::new().unwrap();
    let rows = sample_corpus();
    let path = write_corpus(&dir, &rows);
    assert_eq!(load_corpus(&path).unwrap(), rows);
}

#[test]
fn test_quoted_fields_with_commas() {
    let mut row = example("box, maison", "MODEM", "Modem 4G", 1);
    row.description = "Routeur \"sans fil\", 4G".to_string();
    let text = corpus_csv(std::slice::from_ref(&row));
    let parsed = read_corpus(text.as_bytes()).unwrap();
    assert_eq!(parsed, vec![row]);
}

#[test]
fn test_fractional_price_and_float_label() {
    let data = format!("{}\nA,Name,Cat,Desc,99.5,query,1.0\n", CSV_HEADER);
    let rows = read_corpus(data.as_bytes()).unwrap();
    assert!((rows[0].price - 99.5).abs() < f64::EPSILON);
    assert_eq!(rows[0].label, 1);
}

#[test]
fn test_ragged_row_is_rejected_with_line() {
    let data = format!("{}\nA,Name,Cat,Desc,10,query,1\nB,Name,Cat\n", CSV_HEADER);
    match read_corpus(data.as_bytes()) {
        Err(DjiblyError::Corpus(msg)) => assert!(msg.contains('3'), "{}", msg),
        other => panic!("expected corpus error, got {:?}", other),
    }
}

#[test]
fn test_non_numeric_price_is_rejected() {
    let data = format!("{}\nA,Name,Cat,Desc,cheap,query,1\n", CSV_HEADER);
    assert!(matches!(read_corpus(data.as_bytes()), Err(DjiblyError::Corpus(_))));
}

#[test]
fn test_missing_corpus_file() {
    let dir = TempDir::new().unwrap();
    let err = load_corpus(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, DjiblyError::Io(_)));
}
