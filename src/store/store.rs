//! TableStore: the single-database registry
//!
//! The store owns zero or one `Database`. Absence is a distinct state: every
//! operation other than `create_database` fails with `NotInitialized` until a
//! database exists.
//!
//! # Concurrency
//!
//! One `RwLock` guards the whole database. Mutations hold the write lock for
//! their full validate-then-mutate sequence, so concurrent callers observe
//! either the state before an operation or the state after it. Reads hold the
//! read lock only long enough to clone out what they return.
//!
//! # Positional identity
//!
//! Columns and rows are addressed by index. Deleting a column or row shifts
//! every later one down by one, invalidating any index a caller held for them.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::schema::CellValue;

use super::column::Column;
use super::database::Database;
use super::errors::{StoreError, StoreResult};
use super::row::Row;
use super::table::Table;

/// Thread-safe, in-memory typed table store holding at most one database
#[derive(Debug, Default)]
pub struct TableStore {
    database: RwLock<Option<Database>>,
    metrics: Arc<MetricsRegistry>,
}

impl TableStore {
    /// Create an empty store with its own metrics registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store reporting into a shared metrics registry
    pub fn with_metrics(metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            database: RwLock::new(None),
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Returns whether a database is live
    pub fn is_initialized(&self) -> bool {
        self.read_slot().is_some()
    }

    // ==================
    // Database lifecycle
    // ==================

    /// Creates the database. Fails if one is already live.
    pub fn create_database(&self, name: &str) -> StoreResult<Database> {
        let result = {
            let mut slot = self.write_slot();
            match slot.as_ref() {
                Some(existing) => Err(StoreError::DatabaseExists {
                    existing: existing.name().to_string(),
                }),
                None => {
                    let database = Database::new(name);
                    *slot = Some(database.clone());
                    Ok(database)
                }
            }
        };

        let database = self.record("create_database", result)?;
        log_event_with_fields(Event::DatabaseCreated, &[("database", name)]);
        Ok(database)
    }

    /// Discards the database and everything in it, returning what was removed.
    pub fn delete_database(&self) -> StoreResult<Database> {
        let result = self.write_slot().take().ok_or(StoreError::NotInitialized);

        let database = self.record("delete_database", result)?;
        self.metrics.add_tables_deleted(database.tables().len() as u64);
        for table in database.tables() {
            self.count_cascade(table);
        }
        log_event_with_fields(
            Event::DatabaseDeleted,
            &[
                ("database", database.name()),
                ("tables", &database.tables().len().to_string()),
            ],
        );
        Ok(database)
    }

    pub fn rename_database(&self, new_name: &str) -> StoreResult<Database> {
        let result = self.with_database_mut(|db| {
            let old = db.name().to_string();
            db.rename(new_name);
            Ok((old, db.clone()))
        });

        let (old, database) = self.record("rename_database", result)?;
        log_event_with_fields(
            Event::DatabaseRenamed,
            &[("from", &old), ("to", new_name)],
        );
        Ok(database)
    }

    /// Snapshot of the whole database
    pub fn database(&self) -> StoreResult<Database> {
        let result = self.with_database(|db| Ok(db.clone()));
        self.record_read("database", result)
    }

    // ==================
    // Tables
    // ==================

    pub fn list_tables(&self) -> StoreResult<Vec<Table>> {
        let result = self.with_database(|db| Ok(db.tables().to_vec()));
        self.record_read("list_tables", result)
    }

    pub fn table(&self, table: &str) -> StoreResult<Table> {
        let result = self.with_database(|db| db.table(table).cloned());
        self.record_read("table", result)
    }

    pub fn add_table(&self, name: &str) -> StoreResult<Table> {
        let result = self.with_database_mut(|db| db.add_table(name).cloned());

        let table = self.record("add_table", result)?;
        self.metrics.increment_tables_created();
        log_event_with_fields(Event::TableAdded, &[("table", name)]);
        Ok(table)
    }

    /// Renames a table. Renaming to the current name succeeds without change.
    pub fn rename_table(&self, table: &str, new_name: &str) -> StoreResult<Table> {
        let result = self.with_database_mut(|db| db.rename_table(table, new_name).cloned());

        let renamed = self.record("rename_table", result)?;
        log_event_with_fields(Event::TableRenamed, &[("from", table), ("to", new_name)]);
        Ok(renamed)
    }

    pub fn delete_table(&self, table: &str) -> StoreResult<Table> {
        let result = self.with_database_mut(|db| db.delete_table(table));

        let removed = self.record("delete_table", result)?;
        self.metrics.add_tables_deleted(1);
        self.count_cascade(&removed);
        log_event_with_fields(
            Event::TableDeleted,
            &[("table", table), ("rows", &removed.rows().len().to_string())],
        );
        Ok(removed)
    }

    // ==================
    // Columns
    // ==================

    pub fn list_columns(&self, table: &str) -> StoreResult<Vec<Column>> {
        let result = self.with_database(|db| Ok(db.table(table)?.columns().to_vec()));
        self.record_read("list_columns", result)
    }

    /// Column names in column order
    pub fn list_column_names(&self, table: &str) -> StoreResult<Vec<String>> {
        let result = self.with_database(|db| Ok(db.table(table)?.column_names()));
        self.record_read("list_column_names", result)
    }

    pub fn column(&self, table: &str, column: &str) -> StoreResult<Column> {
        let result = self.with_database(|db| {
            let t = db.table(table)?;
            Ok(t.column(t.column_index(column)?)?.clone())
        });
        self.record_read("column", result)
    }

    /// Resolves a column name to its current index
    pub fn column_index(&self, table: &str, column: &str) -> StoreResult<usize> {
        let result = self.with_database(|db| db.table(table)?.column_index(column));
        self.record_read("column_index", result)
    }

    /// Adds a column declared by a type token; every existing row gains a
    /// default cell of that type.
    pub fn add_column(&self, table: &str, column_name: &str, type_token: &str) -> StoreResult<Column> {
        let result = Column::from_token(column_name, type_token).and_then(|column| {
            self.with_database_mut(|db| {
                db.table_mut(table)?.add_column(column.clone())?;
                Ok(column)
            })
        });

        let column = self.record("add_column", result)?;
        self.metrics.increment_columns_created();
        log_event_with_fields(
            Event::ColumnAdded,
            &[
                ("column", column_name),
                ("table", table),
                ("type", column.column_type().token()),
            ],
        );
        Ok(column)
    }

    /// Removes the column at `column_index` and its cell from every row.
    pub fn delete_column(&self, table: &str, column_index: usize) -> StoreResult<Column> {
        let result = self.with_database_mut(|db| db.table_mut(table)?.delete_column(column_index));

        let removed = self.record("delete_column", result)?;
        self.metrics.add_columns_deleted(1);
        log_event_with_fields(
            Event::ColumnDeleted,
            &[("column", removed.name()), ("table", table)],
        );
        Ok(removed)
    }

    /// Resolves `column` and removes it under one lock, so the index cannot
    /// shift between lookup and delete.
    pub fn delete_column_by_name(&self, table: &str, column: &str) -> StoreResult<Column> {
        let result = self.with_database_mut(|db| {
            let t = db.table_mut(table)?;
            let index = t.column_index(column)?;
            t.delete_column(index)
        });

        let removed = self.record("delete_column", result)?;
        self.metrics.add_columns_deleted(1);
        log_event_with_fields(
            Event::ColumnDeleted,
            &[("column", removed.name()), ("table", table)],
        );
        Ok(removed)
    }

    /// Renames a column. Renaming to its current name succeeds without change.
    pub fn rename_column(&self, table: &str, column: &str, new_name: &str) -> StoreResult<Column> {
        let result = self.with_database_mut(|db| {
            db.table_mut(table)?
                .rename_column(column, new_name)
                .cloned()
        });

        let renamed = self.record("rename_column", result)?;
        log_event_with_fields(
            Event::ColumnRenamed,
            &[("from", column), ("table", table), ("to", new_name)],
        );
        Ok(renamed)
    }

    // ==================
    // Rows
    // ==================

    pub fn list_rows(&self, table: &str) -> StoreResult<Vec<Row>> {
        let result = self.with_database(|db| Ok(db.table(table)?.rows().to_vec()));
        self.record_read("list_rows", result)
    }

    pub fn row(&self, table: &str, row_index: usize) -> StoreResult<Row> {
        let result = self.with_database(|db| db.table(table)?.row(row_index).cloned());
        self.record_read("row", result)
    }

    /// Appends a row of default cells, returning its index
    pub fn add_row(&self, table: &str) -> StoreResult<usize> {
        let result = self.with_database_mut(|db| Ok(db.table_mut(table)?.add_row()));

        let index = self.record("add_row", result)?;
        self.metrics.increment_rows_created();
        log_event_with_fields(
            Event::RowAdded,
            &[("row", &index.to_string()), ("table", table)],
        );
        Ok(index)
    }

    /// Appends a row from raw values. Either the whole row is stored or nothing is.
    pub fn insert_row(&self, table: &str, raw_values: &[Value]) -> StoreResult<(usize, Row)> {
        let result = self.with_database_mut(|db| {
            let t = db.table_mut(table)?;
            let index = t.insert_row(raw_values)?;
            Ok((index, t.rows()[index].clone()))
        });

        let (index, row) = self.record("insert_row", result)?;
        self.metrics.increment_rows_created();
        self.metrics.add_cells_written(row.len() as u64);
        log_event_with_fields(
            Event::RowAdded,
            &[("row", &index.to_string()), ("table", table)],
        );
        Ok((index, row))
    }

    /// Replaces a whole row from raw values. Either every cell changes or none does.
    pub fn update_row(&self, table: &str, row_index: usize, raw_values: &[Value]) -> StoreResult<Row> {
        let result = self.with_database_mut(|db| {
            let t = db.table_mut(table)?;
            t.update_row(row_index, raw_values)?;
            Ok(t.rows()[row_index].clone())
        });

        let row = self.record("update_row", result)?;
        self.metrics.add_cells_written(row.len() as u64);
        log_event_with_fields(
            Event::RowUpdated,
            &[("row", &row_index.to_string()), ("table", table)],
        );
        Ok(row)
    }

    /// Type-checks `raw_value` against the column and writes it. On a type
    /// mismatch the stored cell is left unchanged.
    pub fn set_cell_value(
        &self,
        raw_value: &Value,
        table: &str,
        column_index: usize,
        row_index: usize,
    ) -> StoreResult<CellValue> {
        let result = self.with_database_mut(|db| {
            let t = db.table_mut(table)?;
            t.set_cell(raw_value, column_index, row_index)?;
            Ok(t.rows()[row_index].values()[column_index].clone())
        });

        let cell = self.record("set_cell_value", result)?;
        self.metrics.add_cells_written(1);
        log_event_with_fields(
            Event::CellUpdated,
            &[
                ("column", &column_index.to_string()),
                ("row", &row_index.to_string()),
                ("table", table),
            ],
        );
        Ok(cell)
    }

    /// Removes a row. Rows after it move down one position.
    pub fn delete_row(&self, table: &str, row_index: usize) -> StoreResult<Row> {
        let result = self.with_database_mut(|db| db.table_mut(table)?.delete_row(row_index));

        let removed = self.record("delete_row", result)?;
        self.metrics.add_rows_deleted(1);
        log_event_with_fields(
            Event::RowDeleted,
            &[("row", &row_index.to_string()), ("table", table)],
        );
        Ok(removed)
    }

    // ==================
    // Projection
    // ==================

    /// Builds a detached table of the selected columns (in the given order,
    /// repeats allowed) and the matching cells of every row.
    ///
    /// Callers must not request more indices than the table has columns; such
    /// a request fails with `CardinalityMismatch` rather than being truncated.
    pub fn project(&self, table: &str, column_indices: &[usize]) -> StoreResult<Table> {
        let result = self.with_database(|db| db.table(table)?.project(column_indices));

        let projection = self.record_read("project", result)?;
        self.metrics.increment_projections();
        log_event_with_fields(
            Event::ProjectionBuilt,
            &[
                ("columns", &column_indices.len().to_string()),
                ("table", table),
            ],
        );
        Ok(projection)
    }

    /// Projection by column names. The width check runs before any name is
    /// resolved, matching `project`.
    pub fn project_by_name(&self, table: &str, column_names: &[String]) -> StoreResult<Table> {
        let result = self.with_database(|db| {
            let t = db.table(table)?;
            if column_names.len() > t.columns().len() {
                return Err(StoreError::ProjectionTooWide {
                    table: table.to_string(),
                    requested: column_names.len(),
                    available: t.columns().len(),
                });
            }
            let indices = column_names
                .iter()
                .map(|name| t.column_index(name))
                .collect::<StoreResult<Vec<_>>>()?;
            t.project(&indices)
        });

        let projection = self.record_read("project", result)?;
        self.metrics.increment_projections();
        log_event_with_fields(
            Event::ProjectionBuilt,
            &[
                ("columns", &column_names.len().to_string()),
                ("table", table),
            ],
        );
        Ok(projection)
    }

    // ==================
    // Helpers
    // ==================

    fn read_slot(&self) -> RwLockReadGuard<'_, Option<Database>> {
        self.database.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Option<Database>> {
        self.database.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_database<T>(&self, f: impl FnOnce(&Database) -> StoreResult<T>) -> StoreResult<T> {
        let slot = self.read_slot();
        let db = slot.as_ref().ok_or(StoreError::NotInitialized)?;
        f(db)
    }

    fn with_database_mut<T>(
        &self,
        f: impl FnOnce(&mut Database) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut slot = self.write_slot();
        let db = slot.as_mut().ok_or(StoreError::NotInitialized)?;
        f(db)
    }

    /// Counts a mutation's outcome and logs rejections. Called after the lock is released.
    fn record<T>(&self, operation: &str, result: StoreResult<T>) -> StoreResult<T> {
        match &result {
            Ok(_) => self.metrics.increment_applied(),
            Err(err) => self.reject(operation, err),
        }
        result
    }

    /// Reads only count and log their rejections.
    fn record_read<T>(&self, operation: &str, result: StoreResult<T>) -> StoreResult<T> {
        if let Err(err) = &result {
            self.reject(operation, err);
        }
        result
    }

    fn reject(&self, operation: &str, err: &StoreError) {
        self.metrics.increment_rejected();
        log_event_with_fields(
            Event::OperationRejected,
            &[
                ("code", err.code()),
                ("message", &err.to_string()),
                ("operation", operation),
            ],
        );
    }

    /// Columns and rows dropped along with a whole table
    fn count_cascade(&self, table: &Table) {
        self.metrics.add_columns_deleted(table.columns().len() as u64);
        self.metrics.add_rows_deleted(table.rows().len() as u64);
    }
}
