//! Tests for sparsity pattern ingestion

use chromatic_rs::matrix::{parse_matrix, read_matrix, BooleanMatrix};
use chromatic_rs::ColoringError;
use std::fs;

#[test]
fn test_read_matrix_from_file() {
    let path = std::env::temp_dir().join(format!("chromatic_rs_read_{}.txt", std::process::id()));
    fs::write(&path, "1 0 1\n0 1 0\n").unwrap();

    let matrix = read_matrix(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix.cols(), 3);
    assert_eq!(matrix.count_nonzero(), 3);
}

#[test]
fn test_read_missing_file_is_io_error() {
    let err = read_matrix("/nonexistent/chromatic_rs/pattern.txt").unwrap_err();
    assert!(matches!(err, ColoringError::Io(_)));
}

#[test]
fn test_punctuation_is_not_a_column() {
    let matrix = parse_matrix("[1, 0, 0]\n[0, 0, 1]").unwrap();
    assert_eq!(matrix.cols(), 3);
    assert_eq!(matrix.row(0), &[true, false, false]);
}

#[test]
fn test_windows_line_endings() {
    let matrix = parse_matrix("10\r\n01\r\n").unwrap();
    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix.cols(), 2);
}

#[test]
fn test_ragged_rows_name_the_line() {
    let err = parse_matrix("11\n11\n1\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed input at line 3: expected 2 entries, found 1"
    );
}

#[test]
fn test_from_rows() {
    let matrix = BooleanMatrix::from_rows(&[[true, false], [false, true]]).unwrap();
    assert_eq!(matrix, parse_matrix("10\n01").unwrap());

    let ragged: Vec<Vec<bool>> = vec![vec![true], vec![true, false]];
    assert!(matches!(
        BooleanMatrix::from_rows(&ragged),
        Err(ColoringError::MalformedInput { line: 2, .. })
    ));
}

#[test]
fn test_columns_read_top_to_bottom() {
    let matrix = parse_matrix("10\n11\n01").unwrap();
    let col: Vec<bool> = matrix.column(1).collect();
    assert_eq!(col, vec![false, true, true]);
    assert!(matrix.columns_intersect(0, 1));
    assert!(matrix.rows_intersect(1, 2));
    assert!(!matrix.rows_intersect(0, 2));
}

#[test]
fn test_empty_matrix() {
    let matrix = BooleanMatrix::empty();
    assert!(matrix.is_empty());
    assert_eq!(matrix.transpose(), matrix);
}
