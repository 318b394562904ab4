//! Error types for minidb

use thiserror::Error;

/// Result type alias for minidb operations
pub type DbResult<T> = Result<T, DbError>;

/// Error types for database operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// The executor rejected a generated statement
    #[error("Execution error: {0}")]
    Execution(#[from] tokio_postgres::Error),

    /// Cursor or row access outside the buffered result set
    #[error("Row index {index} out of bounds (row count: {len})")]
    OutOfBounds { index: usize, len: usize },

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Statement rejected before execution
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or malformed connection configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an out-of-bounds error
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Check if this error came from the executor
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }
}
