//! Error types for table construction and rendering.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur while defining, filling, or printing a table.
///
/// A failed [`Table::add_row`](crate::Table::add_row) never leaves a partial
/// row behind: the table stays usable and unchanged.
#[derive(Debug, Error)]
pub enum TableError {
    /// Storage for widths, rows, or cells could not be reserved.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// A column type given by name or code is not one of the known types.
    #[error("unsupported column type: {0}")]
    UnsupportedColumnType(String),

    /// A named color given by name or code is not one of the known colors.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// The row does not supply exactly one cell per column.
    #[error("row has {actual} cells but the table has {expected} columns")]
    ArityMismatch { expected: usize, actual: usize },

    /// A cell value does not match the column's declared type.
    #[error("column {column}: expected {expected} value, got {actual}")]
    TypeMismatch {
        column: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// A cell's style payload does not match the column's flags.
    #[error("column {column}: expected {expected} style, got {actual}")]
    StyleMismatch {
        column: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// A column combines more than one of the color/custom style flags.
    #[error("column {column}: color, rgb and custom flags are mutually exclusive")]
    ConflictingStyleFlags { column: usize },

    /// A column schema document could not be parsed.
    #[error("invalid column schema: {0}")]
    Schema(String),

    /// Writing the rendered table failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for TableError {
    fn from(err: serde_yaml::Error) -> Self {
        TableError::Schema(err.to_string())
    }
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
