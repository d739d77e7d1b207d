//! Error types for matrix operations.

use thiserror::Error;

/// Precondition violations raised by [`Matrix`](crate::Matrix) operations.
///
/// The `&'static str` payloads name the operation that failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Operation attempted on a matrix with a zero dimension.
    #[error("matrix is not initialized: {0}")]
    NotInitialized(&'static str),

    /// Element access outside the matrix bounds.
    #[error("coordinates ({row}, {column}) out of bounds for a {rows}x{columns} matrix")]
    WrongCoordinates {
        /// Requested row.
        row: usize,
        /// Requested column.
        column: usize,
        /// Row count of the matrix.
        rows: usize,
        /// Column count of the matrix.
        columns: usize,
    },

    /// Binary operation between matrices of different shapes.
    #[error("matrices are not the same size: {0}")]
    NotSameSize(&'static str),

    /// Matrix product with incompatible inner dimensions.
    #[error("wrong sizes for product: {left_rows}x{left_columns} * {right_rows}x{right_columns}")]
    WrongSizesForProduct {
        /// Row count of the left operand.
        left_rows: usize,
        /// Column count of the left operand.
        left_columns: usize,
        /// Row count of the right operand.
        right_rows: usize,
        /// Column count of the right operand.
        right_columns: usize,
    },

    /// Operation requiring a (1,3) or (3,1) vector given something else.
    #[error("not a Vector3 ((1,3) or (3,1)): {0}")]
    NotVector3(&'static str),

    /// Operation requiring a fixed shape given something else.
    #[error("wrong size: {0}")]
    WrongSize(&'static str),

    /// Determinant is exactly zero.
    #[error("matrix is not invertible (determinant is zero)")]
    NotInvertible,

    /// Literal initializer exceeds the declared shape.
    #[error("initializer does not fit a {rows}x{columns} matrix")]
    WrongInitializerList {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        columns: usize,
    },
}

/// Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
