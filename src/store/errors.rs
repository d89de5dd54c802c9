//! Store error types
//!
//! Every failed store operation reports exactly one `ErrorKind`. Callers
//! branch on the kind, never on message text.
//!
//! Error codes:
//! - TABLEDB_NOT_INITIALIZED
//! - TABLEDB_ALREADY_EXISTS
//! - TABLEDB_NOT_FOUND
//! - TABLEDB_INDEX_OUT_OF_RANGE
//! - TABLEDB_INVALID_TYPE
//! - TABLEDB_TYPE_MISMATCH
//! - TABLEDB_CARDINALITY_MISMATCH

use std::fmt;

use thiserror::Error;

use crate::schema::{DomainType, SchemaError};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Classification of a store failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No live database
    NotInitialized,
    /// A database, table or column name is already taken at the same scope
    AlreadyExists,
    /// A table or column name does not resolve
    NotFound,
    /// A column or row index is outside the current range
    IndexOutOfRange,
    /// A type token names no domain type
    InvalidType,
    /// A value does not conform to its column's type
    TypeMismatch,
    /// A value count does not match the column count
    CardinalityMismatch,
}

impl ErrorKind {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotInitialized => "TABLEDB_NOT_INITIALIZED",
            ErrorKind::AlreadyExists => "TABLEDB_ALREADY_EXISTS",
            ErrorKind::NotFound => "TABLEDB_NOT_FOUND",
            ErrorKind::IndexOutOfRange => "TABLEDB_INDEX_OUT_OF_RANGE",
            ErrorKind::InvalidType => "TABLEDB_INVALID_TYPE",
            ErrorKind::TypeMismatch => "TABLEDB_TYPE_MISMATCH",
            ErrorKind::CardinalityMismatch => "TABLEDB_CARDINALITY_MISMATCH",
        }
    }

    /// Returns true if the failure means "the thing you addressed is not there"
    pub fn is_not_found(&self) -> bool {
        matches!(self, ErrorKind::NotFound | ErrorKind::IndexOutOfRange)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    // ==================
    // Lifecycle
    // ==================
    /// No database has been created
    #[error("Database is not created yet")]
    NotInitialized,

    /// A database is already live
    #[error("Database is already created (current database: {existing})")]
    DatabaseExists { existing: String },

    // ==================
    // Name collisions
    // ==================
    #[error("Database {database} already contains the table named {table}")]
    TableExists { database: String, table: String },

    #[error("Table {table} already contains the column named {column}")]
    ColumnExists { table: String, column: String },

    // ==================
    // Lookups
    // ==================
    #[error("There is no table named {0} in the database")]
    TableNotFound(String),

    #[error("There is no column named {column} in the table {table}")]
    ColumnNotFound { table: String, column: String },

    #[error("Column index {index} is out of range for table {table} ({len} columns)")]
    ColumnIndexOutOfRange {
        table: String,
        index: usize,
        len: usize,
    },

    #[error("There is no row in the table named {table} at index {index} ({len} rows)")]
    RowIndexOutOfRange {
        table: String,
        index: usize,
        len: usize,
    },

    // ==================
    // Typing
    // ==================
    #[error(transparent)]
    InvalidType(#[from] SchemaError),

    #[error("Value {value} is of invalid type for column {column} (expected {expected})")]
    TypeMismatch {
        column: String,
        expected: DomainType,
        value: String,
    },

    // ==================
    // Cardinality
    // ==================
    #[error("Numbers of the row's values ({actual}) and the table's columns ({expected}) don't match")]
    CardinalityMismatch { expected: usize, actual: usize },

    #[error("Number of columns provided ({requested}) is greater than number of columns in the table named {table} ({available})")]
    ProjectionTooWide {
        table: String,
        requested: usize,
        available: usize,
    },
}

impl StoreError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotInitialized => ErrorKind::NotInitialized,
            StoreError::DatabaseExists { .. }
            | StoreError::TableExists { .. }
            | StoreError::ColumnExists { .. } => ErrorKind::AlreadyExists,
            StoreError::TableNotFound(_) | StoreError::ColumnNotFound { .. } => ErrorKind::NotFound,
            StoreError::ColumnIndexOutOfRange { .. } | StoreError::RowIndexOutOfRange { .. } => {
                ErrorKind::IndexOutOfRange
            }
            StoreError::InvalidType(_) => ErrorKind::InvalidType,
            StoreError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            StoreError::CardinalityMismatch { .. } | StoreError::ProjectionTooWide { .. } => {
                ErrorKind::CardinalityMismatch
            }
        }
    }

    /// Returns the stable error code of this error's kind
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(StoreError::NotInitialized.kind(), ErrorKind::NotInitialized);
        assert_eq!(
            StoreError::TableExists {
                database: "db".into(),
                table: "t".into()
            }
            .kind(),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            StoreError::ProjectionTooWide {
                table: "t".into(),
                requested: 4,
                available: 3
            }
            .kind(),
            ErrorKind::CardinalityMismatch
        );
        assert_eq!(
            StoreError::from(SchemaError::UnknownType("x".into())).kind(),
            ErrorKind::InvalidType
        );
    }

    #[test]
    fn test_not_found_class() {
        assert!(ErrorKind::NotFound.is_not_found());
        assert!(ErrorKind::IndexOutOfRange.is_not_found());
        assert!(!ErrorKind::TypeMismatch.is_not_found());
        assert!(!ErrorKind::NotInitialized.is_not_found());
    }

    #[test]
    fn test_codes_are_distinct() {
        let kinds = [
            ErrorKind::NotInitialized,
            ErrorKind::AlreadyExists,
            ErrorKind::NotFound,
            ErrorKind::IndexOutOfRange,
            ErrorKind::InvalidType,
            ErrorKind::TypeMismatch,
            ErrorKind::CardinalityMismatch,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = StoreError::TypeMismatch {
            column: "age".into(),
            expected: DomainType::Integer,
            value: "\"abc\"".into(),
        };
        let display = err.to_string();
        assert!(display.contains("age"));
        assert!(display.contains("integer"));
        assert!(display.contains("abc"));
    }
}
