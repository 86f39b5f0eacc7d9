//! Shared error type for the preparation transforms.

use std::io;

/// Errors that can occur while preparing training data.
///
/// Every error aborts the whole call: there are no partial results and no
/// retries. Schema and type errors are raised before any row is touched.
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("column {column} has {got} rows, expected {expected}")]
    ColumnLenMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("unsupported column type for {column}: expected {expected}, got {got}")]
    UnsupportedType {
        column: String,
        expected: String,
        got: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
