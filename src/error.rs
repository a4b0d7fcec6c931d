//! Error types for filter parsing and store operations.

use thiserror::Error;

/// Problems found while turning filter text into an expression.
#[derive(Debug, Clone, Error)]
pub enum FilterError {
    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A column's filter text could not be parsed. The column matches
    /// everything until the text is corrected.
    #[error("invalid filter for column {column} ('{name}'): {source}")]
    InvalidColumnFilter {
        column: usize,
        name: String,
        #[source]
        source: Box<FilterError>,
    },
}

impl FilterError {
    /// The column this error is scoped to, if any.
    pub fn column(&self) -> Option<usize> {
        match self {
            FilterError::InvalidColumnFilter { column, .. } => Some(*column),
            FilterError::InvalidRegex { .. } => None,
        }
    }
}

/// Contract violations rejected at the store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("column {column} out of range [0, {count})")]
    ColumnOutOfRange { column: usize, count: usize },

    #[error("row {row} out of range [0, {count})")]
    RowOutOfRange { row: usize, count: usize },

    #[error("row does not belong to this store")]
    RowNotInStore,

    #[error("row has {found} cells but the schema has {expected} columns")]
    ArityMismatch { expected: usize, found: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
