//! Schema error types

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while interpreting type tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The token names no known domain type
    #[error("Unknown column type '{0}' (expected one of: integer, real, char, string, boolean)")]
    UnknownType(String),
}
