//! Column definition

use serde::Serialize;

use crate::schema::{DomainType, TypeParser};

use super::errors::StoreResult;

/// A named, typed column. The type is fixed at creation; only the name changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    name: String,
    #[serde(rename = "type")]
    column_type: DomainType,
}

impl Column {
    /// Create a column of a known type
    pub fn new(name: impl Into<String>, column_type: DomainType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Create a column from an external type token (`"integer"`, `"real"`, ...)
    pub fn from_token(name: impl Into<String>, token: &str) -> StoreResult<Self> {
        let column_type = TypeParser::parse(token)?;
        Ok(Self::new(name, column_type))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> DomainType {
        self.column_type
    }

    pub(crate) fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ErrorKind;

    #[test]
    fn test_from_token() {
        let column = Column::from_token("age", "integer").unwrap();
        assert_eq!(column.name(), "age");
        assert_eq!(column.column_type(), DomainType::Integer);
    }

    #[test]
    fn test_from_unknown_token() {
        let err = Column::from_token("age", "int").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
    }

    #[test]
    fn test_serializes_type_as_token() {
        let column = Column::new("initial", DomainType::Char);
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json, serde_json::json!({"name": "initial", "type": "char"}));
    }

    #[test]
    fn test_rename_keeps_type() {
        let mut column = Column::new("a", DomainType::Real);
        column.rename("b");
        assert_eq!(column.name(), "b");
        assert_eq!(column.column_type(), DomainType::Real);
    }
}
