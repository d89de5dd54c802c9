//! Domain type definitions
//!
//! Supported column types:
//! - integer: 64-bit signed integer
//! - real: 64-bit floating point
//! - char: a single Unicode scalar value
//! - string: UTF-8 string
//! - boolean: Boolean

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of types a column may declare.
///
/// Serialized as its type token, so `DomainType::Integer` round-trips as
/// `"integer"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Real,
    /// Single character
    Char,
    /// UTF-8 string
    String,
    /// Boolean
    Boolean,
}

impl DomainType {
    /// Every domain type, in token-table order
    pub const ALL: [DomainType; 5] = [
        DomainType::Integer,
        DomainType::Real,
        DomainType::Char,
        DomainType::String,
        DomainType::Boolean,
    ];

    /// Returns the external type token
    pub fn token(&self) -> &'static str {
        match self {
            DomainType::Integer => "integer",
            DomainType::Real => "real",
            DomainType::Char => "char",
            DomainType::String => "string",
            DomainType::Boolean => "boolean",
        }
    }

    /// Returns the placeholder cell a new slot of this type starts with.
    ///
    /// The default is always a valid value of the type, so a freshly added
    /// row or column never breaks type conformance.
    pub fn default_value(&self) -> CellValue {
        match self {
            DomainType::Integer => CellValue::Integer(0),
            DomainType::Real => CellValue::Real(0.0),
            DomainType::Char => CellValue::Char(' '),
            DomainType::String => CellValue::Text(String::new()),
            DomainType::Boolean => CellValue::Boolean(false),
        }
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A typed cell value.
///
/// Serialized untagged so a row renders as a plain JSON array
/// (`[30, "Alice", true]`). Not `Deserialize`: raw input
/// becomes a `CellValue` only through `TypeParser::convert`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Real(f64),
    Char(char),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    /// Returns the domain type this value belongs to
    pub fn domain_type(&self) -> DomainType {
        match self {
            CellValue::Integer(_) => DomainType::Integer,
            CellValue::Real(_) => DomainType::Real,
            CellValue::Char(_) => DomainType::Char,
            CellValue::Text(_) => DomainType::String,
            CellValue::Boolean(_) => DomainType::Boolean,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Real(v) => write!(f, "{}", v),
            CellValue::Char(v) => write!(f, "{}", v),
            CellValue::Text(v) => write!(f, "{}", v),
            CellValue::Boolean(v) => write!(f, "{}", v),
        }
    }
}
