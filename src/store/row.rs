//! Row storage
//!
//! A row is an ordered list of cells aligned by position with its table's
//! columns. Rows have no identity beyond their position in the table.

use serde::Serialize;

use crate::schema::CellValue;

use super::column::Column;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    values: Vec<CellValue>,
}

impl Row {
    /// A row of default cells, one per column
    pub fn with_defaults(columns: &[Column]) -> Self {
        Self {
            values: columns
                .iter()
                .map(|c| c.column_type().default_value())
                .collect(),
        }
    }

    pub(crate) fn from_values(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replaces one cell, returning the previous value. Index must be valid.
    pub(crate) fn replace(&mut self, index: usize, value: CellValue) -> CellValue {
        std::mem::replace(&mut self.values[index], value)
    }

    pub(crate) fn push(&mut self, value: CellValue) {
        self.values.push(value);
    }

    /// Removes one cell. Index must be valid.
    pub(crate) fn remove(&mut self, index: usize) -> CellValue {
        self.values.remove(index)
    }

    /// Builds a new row from the cells at `indices`, in that order. Indices must be valid.
    pub(crate) fn select(&self, indices: &[usize]) -> Row {
        Row {
            values: indices.iter().map(|&i| self.values[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DomainType;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", DomainType::Integer),
            Column::new("name", DomainType::String),
            Column::new("active", DomainType::Boolean),
        ]
    }

    #[test]
    fn test_defaults_follow_column_types() {
        let row = Row::with_defaults(&columns());
        assert_eq!(
            row.values(),
            &[
                CellValue::Integer(0),
                CellValue::Text(String::new()),
                CellValue::Boolean(false)
            ]
        );
    }

    #[test]
    fn test_select_reorders_and_duplicates() {
        let row = Row::from_values(vec![
            CellValue::Integer(1),
            CellValue::Text("a".into()),
            CellValue::Boolean(true),
        ]);
        let selected = row.select(&[2, 0, 0]);
        assert_eq!(
            selected.values(),
            &[
                CellValue::Boolean(true),
                CellValue::Integer(1),
                CellValue::Integer(1)
            ]
        );
    }

    #[test]
    fn test_serializes_as_values_object() {
        let row = Row::from_values(vec![CellValue::Integer(7), CellValue::Char('z')]);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!({"values": [7, "z"]}));
    }
}
