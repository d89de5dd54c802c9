//! Table: ordered columns plus ordered rows bound by the arity invariant
//!
//! Invariants held after every successful mutation:
//! - every row has exactly one cell per column
//! - cell `i` of every row conforms to the type of column `i`
//! - column names are unique within the table
//!
//! Every mutating method validates everything first and mutates second, so an
//! `Err` return leaves the table untouched.

use serde::Serialize;
use serde_json::Value;

use crate::schema::{CellValue, TypeParser};

use super::column::Column;
use super::errors::{StoreError, StoreResult};
use super::row::Row;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column names in column order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Position of the first column with exactly this name
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Resolves a column name to its index
    pub fn column_index(&self, name: &str) -> StoreResult<usize> {
        self.column_position(name)
            .ok_or_else(|| StoreError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    pub fn column(&self, index: usize) -> StoreResult<&Column> {
        self.check_column_index(index)?;
        Ok(&self.columns[index])
    }

    pub fn row(&self, index: usize) -> StoreResult<&Row> {
        self.check_row_index(index)?;
        Ok(&self.rows[index])
    }

    /// Checks the arity and type invariants across every row
    pub fn is_consistent(&self) -> bool {
        self.rows.iter().all(|row| {
            row.len() == self.columns.len()
                && row
                    .values()
                    .iter()
                    .zip(&self.columns)
                    .all(|(cell, column)| cell.domain_type() == column.column_type())
        })
    }

    pub(crate) fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }

    // ==================
    // Columns
    // ==================

    /// Appends a column and a default cell of its type to every row
    pub fn add_column(&mut self, column: Column) -> StoreResult<()> {
        if self.column_position(column.name()).is_some() {
            return Err(StoreError::ColumnExists {
                table: self.name.clone(),
                column: column.name().to_string(),
            });
        }

        let default = column.column_type().default_value();
        for row in &mut self.rows {
            row.push(default.clone());
        }
        self.columns.push(column);
        Ok(())
    }

    /// Renames a column in place. Renaming to the current name is a no-op.
    pub fn rename_column(&mut self, column: &str, new_name: &str) -> StoreResult<&Column> {
        let index = self.column_index(column)?;
        match self.column_position(new_name) {
            Some(other) if other != index => {
                return Err(StoreError::ColumnExists {
                    table: self.name.clone(),
                    column: new_name.to_string(),
                });
            }
            _ => {}
        }

        self.columns[index].rename(new_name);
        Ok(&self.columns[index])
    }

    /// Removes a column and the matching cell from every row
    pub fn delete_column(&mut self, index: usize) -> StoreResult<Column> {
        self.check_column_index(index)?;

        for row in &mut self.rows {
            row.remove(index);
        }
        Ok(self.columns.remove(index))
    }

    // ==================
    // Rows
    // ==================

    /// Appends a row of default cells, returning its index
    pub fn add_row(&mut self) -> usize {
        self.rows.push(Row::with_defaults(&self.columns));
        self.rows.len() - 1
    }

    /// Appends a row built from raw values, returning its index.
    ///
    /// Every value is converted before the row is appended, so a failure on
    /// any value leaves no row behind.
    pub fn insert_row(&mut self, raw_values: &[Value]) -> StoreResult<usize> {
        let row = self.convert_row(raw_values)?;
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// Replaces a whole row with raw values, returning the previous row.
    pub fn update_row(&mut self, index: usize, raw_values: &[Value]) -> StoreResult<Row> {
        self.check_row_index(index)?;
        let row = self.convert_row(raw_values)?;
        Ok(std::mem::replace(&mut self.rows[index], row))
    }

    /// Type-checks and writes one cell, returning the previous value.
    pub fn set_cell(
        &mut self,
        raw_value: &Value,
        column_index: usize,
        row_index: usize,
    ) -> StoreResult<CellValue> {
        self.check_column_index(column_index)?;
        self.check_row_index(row_index)?;

        let cell = self.convert_cell(raw_value, column_index)?;
        Ok(self.rows[row_index].replace(column_index, cell))
    }

    /// Removes a row. Every later row moves down one position.
    pub fn delete_row(&mut self, index: usize) -> StoreResult<Row> {
        self.check_row_index(index)?;
        Ok(self.rows.remove(index))
    }

    // ==================
    // Projection
    // ==================

    /// Builds a detached table holding the selected columns, in the given
    /// order, and the matching cells of every row. Indices may repeat.
    ///
    /// Asking for more columns than the table has is rejected up front,
    /// before any index is checked.
    pub fn project(&self, column_indices: &[usize]) -> StoreResult<Table> {
        if column_indices.len() > self.columns.len() {
            return Err(StoreError::ProjectionTooWide {
                table: self.name.clone(),
                requested: column_indices.len(),
                available: self.columns.len(),
            });
        }
        for &index in column_indices {
            self.check_column_index(index)?;
        }

        Ok(Table {
            name: self.name.clone(),
            columns: column_indices
                .iter()
                .map(|&i| self.columns[i].clone())
                .collect(),
            rows: self.rows.iter().map(|r| r.select(column_indices)).collect(),
        })
    }

    // ==================
    // Helpers
    // ==================

    fn check_column_index(&self, index: usize) -> StoreResult<()> {
        if index >= self.columns.len() {
            return Err(StoreError::ColumnIndexOutOfRange {
                table: self.name.clone(),
                index,
                len: self.columns.len(),
            });
        }
        Ok(())
    }

    fn check_row_index(&self, index: usize) -> StoreResult<()> {
        if index >= self.rows.len() {
            return Err(StoreError::RowIndexOutOfRange {
                table: self.name.clone(),
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    fn convert_cell(&self, raw_value: &Value, column_index: usize) -> StoreResult<CellValue> {
        let column = &self.columns[column_index];
        TypeParser::convert(raw_value, column.column_type()).ok_or_else(|| {
            StoreError::TypeMismatch {
                column: column.name().to_string(),
                expected: column.column_type(),
                value: raw_value.to_string(),
            }
        })
    }

    fn convert_row(&self, raw_values: &[Value]) -> StoreResult<Row> {
        if raw_values.len() != self.columns.len() {
            return Err(StoreError::CardinalityMismatch {
                expected: self.columns.len(),
                actual: raw_values.len(),
            });
        }

        let values = raw_values
            .iter()
            .enumerate()
            .map(|(i, raw)| self.convert_cell(raw, i))
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(Row::from_values(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DomainType;
    use crate::store::ErrorKind;
    use serde_json::json;

    fn people() -> Table {
        let mut table = Table::new("people");
        table.add_column(Column::new("id", DomainType::Integer)).unwrap();
        table.add_column(Column::new("name", DomainType::String)).unwrap();
        table.add_column(Column::new("score", DomainType::Real)).unwrap();
        table.insert_row(&[json!(1), json!("ann"), json!(1.5)]).unwrap();
        table.insert_row(&[json!(2), json!("bob"), json!(2.5)]).unwrap();
        table.insert_row(&[json!(3), json!("cid"), json!(3.5)]).unwrap();
        table
    }

    #[test]
    fn test_add_column_extends_existing_rows() {
        let mut table = people();
        table.add_column(Column::new("initial", DomainType::Char)).unwrap();

        assert!(table.is_consistent());
        for row in table.rows() {
            assert_eq!(row.get(3), Some(&CellValue::Char(' ')));
        }
    }

    #[test]
    fn test_add_duplicate_column_is_rejected() {
        let mut table = people();
        let before = table.clone();

        let err = table.add_column(Column::new("name", DomainType::Integer)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(table, before);
    }

    #[test]
    fn test_delete_column_preserves_remaining_order() {
        let mut table = people();
        let removed = table.delete_column(1).unwrap();

        assert_eq!(removed.name(), "name");
        assert_eq!(table.column_names(), vec!["id", "score"]);
        assert_eq!(
            table.rows()[1].values(),
            &[CellValue::Integer(2), CellValue::Real(2.5)]
        );
        assert!(table.is_consistent());
    }

    #[test]
    fn test_delete_column_out_of_range() {
        let mut table = people();
        let err = table.delete_column(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(table.columns().len(), 3);
    }

    #[test]
    fn test_rename_column_rules() {
        let mut table = people();

        // self-rename is a no-op
        table.rename_column("name", "name").unwrap();
        assert_eq!(table.column_names(), vec!["id", "name", "score"]);

        let err = table.rename_column("name", "id").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        let err = table.rename_column("missing", "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let renamed = table.rename_column("score", "points").unwrap();
        assert_eq!(renamed.column_type(), DomainType::Real);
        assert_eq!(table.column_position("points"), Some(2));
    }

    #[test]
    fn test_insert_row_is_all_or_nothing() {
        let mut table = people();

        let err = table
            .insert_row(&[json!(4), json!("dee"), json!("not a number")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(table.rows().len(), 3);

        let err = table.insert_row(&[json!(4), json!("dee")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CardinalityMismatch);
        assert_eq!(table.rows().len(), 3);
    }

    #[test]
    fn test_update_row_is_all_or_nothing() {
        let mut table = people();
        let before = table.rows()[0].clone();

        let err = table
            .update_row(0, &[json!(9), json!(false), json!(9.0)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(table.rows()[0], before);

        let previous = table
            .update_row(0, &[json!("9"), json!("zed"), json!("9.25")])
            .unwrap();
        assert_eq!(previous, before);
        assert_eq!(
            table.rows()[0].values(),
            &[
                CellValue::Integer(9),
                CellValue::Text("zed".into()),
                CellValue::Real(9.25)
            ]
        );
    }

    #[test]
    fn test_set_cell_rejects_mismatch_without_change() {
        let mut table = people();

        let err = table.set_cell(&json!("abc"), 0, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(table.rows()[1].get(0), Some(&CellValue::Integer(2)));

        let previous = table.set_cell(&json!("20"), 0, 1).unwrap();
        assert_eq!(previous, CellValue::Integer(2));
        assert_eq!(table.rows()[1].get(0), Some(&CellValue::Integer(20)));
    }

    #[test]
    fn test_set_cell_bad_indices() {
        let mut table = people();
        assert_eq!(
            table.set_cell(&json!(1), 3, 0).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange
        );
        assert_eq!(
            table.set_cell(&json!(1), 0, 3).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange
        );
    }

    #[test]
    fn test_delete_row_shifts_later_rows() {
        let mut table = people();
        let removed = table.delete_row(1).unwrap();

        assert_eq!(removed.get(1), Some(&CellValue::Text("bob".into())));
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1].get(1), Some(&CellValue::Text("cid".into())));
        assert_eq!(table.delete_row(2).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    }

    #[test]
    fn test_project_reorders_and_duplicates() {
        let table = people();
        let projection = table.project(&[2, 0, 0]).unwrap();

        assert_eq!(projection.column_names(), vec!["score", "id", "id"]);
        assert_eq!(projection.rows().len(), 3);
        assert_eq!(
            projection.rows()[0].values(),
            &[CellValue::Real(1.5), CellValue::Integer(1), CellValue::Integer(1)]
        );
        assert!(projection.is_consistent());
    }

    #[test]
    fn test_project_is_detached() {
        let table = people();
        let mut projection = table.project(&[0]).unwrap();

        projection.set_cell(&json!(100), 0, 0).unwrap();
        projection.delete_row(2).unwrap();

        assert_eq!(table.rows()[0].get(0), Some(&CellValue::Integer(1)));
        assert_eq!(table.rows().len(), 3);
    }

    #[test]
    fn test_project_limits() {
        let table = people();

        let err = table.project(&[0, 1, 2, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CardinalityMismatch);

        let err = table.project(&[0, 5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);

        let empty = table.project(&[]).unwrap();
        assert!(empty.columns().is_empty());
        assert_eq!(empty.rows().len(), 3);
        assert!(empty.rows().iter().all(|r| r.is_empty()));
    }
}
