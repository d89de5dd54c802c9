//! Schema subsystem for tabledb
//!
//! Column types are a closed enumeration. Every cell write is gated by
//! `TypeParser::convert`, the single boundary between loosely-typed external
//! values and typed cells.
//!
//! # Design Principles
//!
//! - Exact, case-sensitive type tokens
//! - No lossy coercion
//! - Deterministic validation

mod errors;
mod parser;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use parser::TypeParser;
pub use types::{CellValue, DomainType};
