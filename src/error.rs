//! Errors reported while building a [`Matrix`](crate::Matrix).

use thiserror::Error;

/// Reasons for [`Matrix::add_row`](crate::Matrix::add_row) to reject a row.
///
/// A rejected row is never partially linked: the matrix is left exactly as
/// it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The row touches no columns.
    #[error("row must contain at least one column")]
    Empty,

    /// A column index lies outside `1..=size`.
    #[error("column {column} is out of range for a matrix with {size} columns")]
    ColumnOutOfRange {
        /// The offending column index.
        column: usize,
        /// The number of columns in the matrix.
        size: usize,
    },

    /// A column index appears more than once in the row.
    #[error("column {column} appears more than once in the row")]
    DuplicateColumn {
        /// The repeated column index.
        column: usize,
    },
}
