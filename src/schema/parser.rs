//! Type token parsing and value conformance
//!
//! Conformance semantics:
//! - Deterministic and side-effect-free
//! - No lossy coercion (a fractional number never becomes an integer)
//! - Strings are read lexically, so `"30"` conforms to integer
//! - Null, arrays and objects never conform

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{CellValue, DomainType};

/// Maps type tokens to domain types and gates raw values into typed cells.
///
/// `convert` is the only path from an untyped external value to a
/// `CellValue`; every cell write in the store goes through it.
pub struct TypeParser;

impl TypeParser {
    /// Parses a type token. Matching is exact and case-sensitive.
    pub fn parse(token: &str) -> SchemaResult<DomainType> {
        DomainType::ALL
            .into_iter()
            .find(|ty| ty.token() == token)
            .ok_or_else(|| SchemaError::UnknownType(token.to_string()))
    }

    /// Returns whether `raw` can be read as `ty` without loss.
    pub fn conforms(raw: &Value, ty: DomainType) -> bool {
        Self::convert(raw, ty).is_some()
    }

    /// Converts `raw` into a cell of type `ty`, or `None` if it does not conform.
    pub fn convert(raw: &Value, ty: DomainType) -> Option<CellValue> {
        match ty {
            DomainType::Integer => match raw {
                Value::Number(n) => n.as_i64().map(CellValue::Integer),
                Value::String(s) => parse_integer(s).map(CellValue::Integer),
                _ => None,
            },
            DomainType::Real => match raw {
                Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(CellValue::Real),
                Value::String(s) => s
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(CellValue::Real),
                _ => None,
            },
            DomainType::Char => {
                let s = raw.as_str()?;
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(CellValue::Char(c)),
                    _ => None,
                }
            }
            DomainType::String => raw.as_str().map(|s| CellValue::Text(s.to_string())),
            DomainType::Boolean => match raw {
                Value::Bool(b) => Some(CellValue::Boolean(*b)),
                Value::String(s) if s == "true" => Some(CellValue::Boolean(true)),
                Value::String(s) if s == "false" => Some(CellValue::Boolean(false)),
                _ => None,
            },
        }
    }
}

/// Optional sign followed by ASCII digits only.
fn parse_integer(s: &str) -> Option<i64> {
    let digits = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
