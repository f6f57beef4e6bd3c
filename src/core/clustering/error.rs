use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClusteringError {
    #[error("distance matrix is empty")]
    EmptyMatrix,
    #[error("distance matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("distance matrix row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid distance {value} at ({row}, {col}): must be finite and non-negative")]
    InvalidDistance { row: usize, col: usize, value: f64 },
    #[error("unknown linkage method '{0}', expected 'max' or 'average'")]
    UnknownMethod(String),
}
