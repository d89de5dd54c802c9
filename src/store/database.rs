//! Database: a named, ordered collection of tables

use serde::Serialize;

use super::errors::{StoreError, StoreResult};
use super::table::Table;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Database {
    name: String,
    tables: Vec<Table>,
}

impl Database {
    /// Create an empty database
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tables in creation order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name().to_string()).collect()
    }

    pub(crate) fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }

    fn table_position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name() == name)
    }

    /// Looks up a table by exact name
    pub fn table(&self, name: &str) -> StoreResult<&Table> {
        self.table_position(name)
            .map(|i| &self.tables[i])
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub(crate) fn table_mut(&mut self, name: &str) -> StoreResult<&mut Table> {
        match self.table_position(name) {
            Some(i) => Ok(&mut self.tables[i]),
            None => Err(StoreError::TableNotFound(name.to_string())),
        }
    }

    /// Appends an empty table
    pub(crate) fn add_table(&mut self, name: &str) -> StoreResult<&Table> {
        if self.table_position(name).is_some() {
            return Err(StoreError::TableExists {
                database: self.name.clone(),
                table: name.to_string(),
            });
        }
        self.tables.push(Table::new(name));
        Ok(&self.tables[self.tables.len() - 1])
    }

    /// Renames a table in place. Renaming to the current name is a no-op.
    pub(crate) fn rename_table(&mut self, name: &str, new_name: &str) -> StoreResult<&Table> {
        let index = self
            .table_position(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))?;
        match self.table_position(new_name) {
            Some(other) if other != index => {
                return Err(StoreError::TableExists {
                    database: self.name.clone(),
                    table: new_name.to_string(),
                });
            }
            _ => {}
        }

        self.tables[index].rename(new_name);
        Ok(&self.tables[index])
    }

    /// Removes a table with all of its columns and rows
    pub(crate) fn delete_table(&mut self, name: &str) -> StoreResult<Table> {
        let index = self
            .table_position(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))?;
        Ok(self.tables.remove(index))
    }
}
