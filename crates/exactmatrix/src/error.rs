//! Error types for exactmatrix

use thiserror::Error;

/// Result type for exactmatrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors that can occur during matrix and Markov chain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Matrix would have no rows or no columns
    #[error("Empty matrices are not supported")]
    EmptyMatrix,

    /// Row length differs from the first row
    #[error("Row {row} has length {actual}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Square matrix requested from a rectangular one
    #[error("Matrix of shape ({nrows}, {ncols}) is not square")]
    NotSquare { nrows: usize, ncols: usize },

    /// Operand shapes are incompatible
    #[error(
        "Dimension mismatch in {operation}: ({lhs_rows}, {lhs_cols}) vs ({rhs_rows}, {rhs_cols})"
    )]
    DimensionMismatch {
        operation: &'static str,
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    /// Row index out of bounds
    #[error("Row {row} is out of bounds for a matrix with {nrows} rows")]
    RowOutOfBounds { row: usize, nrows: usize },

    /// Cell index out of bounds
    #[error("Index out of bounds: ({row}, {col}) is out of bounds for a ({nrows}, {ncols}) matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    /// Determinant equals the additive identity
    #[error("Matrix\n{matrix}\nhas a determinant equivalent to zero, i.e. {zero}")]
    SingularMatrix { matrix: String, zero: String },

    /// Every state of the chain is absorbing
    #[error("Markov chain has no transient states")]
    NoTransientStates,

    /// No state of the chain is absorbing
    #[error("Markov chain has no absorbing states")]
    NoAbsorbingStates,

    /// State is absorbing where a transient state is required
    #[error("State {state} is not a transient state")]
    StateNotTransient { state: usize },

    /// Row is neither a probability distribution nor all zero
    #[error("Row {row} of the transition matrix sums to {sum}, expected one or zero")]
    NotStochastic { row: usize, sum: String },
}
