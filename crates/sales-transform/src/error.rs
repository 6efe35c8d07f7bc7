//! Error types for merging and profiling.

use polars::prelude::PolarsError;
use sales_model::AuxiliaryTable;
use thiserror::Error;

/// Which side of a join a key column was expected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSide {
    Left,
    Right,
}

impl std::fmt::Display for JoinSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinSide::Left => f.write_str("left"),
            JoinSide::Right => f.write_str("right"),
        }
    }
}

/// Errors raised while joining reference tables onto the primary frame.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A join step was configured without key columns.
    #[error("join with {table} has no key columns")]
    NoKeys { table: AuxiliaryTable },

    /// A key column is absent from one side of the join.
    #[error("key column '{column}' not found on the {side} side of the join with {table}")]
    MissingKey {
        table: AuxiliaryTable,
        side: JoinSide,
        column: String,
    },

    /// The key column has different storage types on each side.
    #[error(
        "key column '{column}' has type {left} on the left but {right} in {table}"
    )]
    KeyTypeMismatch {
        table: AuxiliaryTable,
        column: String,
        left: String,
        right: String,
    },

    /// The right-hand table repeats key tuples and the policy forbids it.
    #[error("{table} has {duplicates} rows with duplicate keys {keys:?}")]
    DuplicateKeys {
        table: AuxiliaryTable,
        keys: Vec<String>,
        duplicates: usize,
    },

    /// The dataframe engine failed.
    #[error("join with {table} failed: {source}")]
    Join {
        table: AuxiliaryTable,
        #[source]
        source: PolarsError,
    },
}

/// Errors raised while building a column profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The distinct-value threshold must be positive.
    #[error("unique value threshold must be greater than zero")]
    InvalidThreshold,

    /// A requested column does not exist in the frame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// A statistic could not be computed for a column.
    #[error("failed to compute {statistic} for column '{column}': {message}")]
    Statistic {
        column: String,
        statistic: &'static str,
        message: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for ProfileError {
    fn from(err: PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for merge operations.
pub type MergeResult<T> = std::result::Result<T, MergeError>;

/// Result type for profile operations.
pub type ProfileResult<T> = std::result::Result<T, ProfileError>;
