//! Response envelope
//!
//! Every successful response is `{ "value": ..., "links": { name: href } }`.
//! Links point at the operations that make sense next for the returned value.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::store::{Column, Database, Table};

/// Success envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub value: T,
    pub links: BTreeMap<String, String>,
}

impl<T> Envelope<T> {
    pub fn new(value: T, links: Links) -> Self {
        Self {
            value,
            links: links.0,
        }
    }
}

/// Ordered set of named hypermedia links
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Links(BTreeMap<String, String>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, href: impl Into<String>) -> Self {
        self.0.insert(name.into(), href.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    // ==================
    // Per-resource link sets
    // ==================

    pub fn for_database(database: &Database) -> Self {
        let links = Self::new()
            .with("updateDatabase", "/api/Database/{newName}")
            .with("deleteDatabase", "/api/Database")
            .with("tables", "/api/Tables")
            .with("createTable", "/api/Tables/{name}");

        if database.tables().is_empty() {
            links
        } else {
            links
                .with("updateTable", "/api/Tables/{oldName}/{newName}")
                .with("deleteTable", "/api/Tables/{name}")
        }
    }

    pub fn for_deleted_database() -> Self {
        Self::new().with("createDatabase", "/api/Database/{name}")
    }

    pub fn for_tables(tables: &[Table]) -> Self {
        tables.iter().fold(Self::new(), |links, t| {
            links.with(t.name(), format!("/api/Tables/{}", t.name()))
        })
    }

    pub fn for_table(table: &Table) -> Self {
        let name = table.name();
        let mut links = Self::new()
            .with("updateTable", format!("/api/Tables/{}/{{newName}}", name))
            .with("deleteTable", format!("/api/Tables/{}", name))
            .with("columns", format!("/api/Tables/{}/Columns", name))
            .with("rows", format!("/api/Tables/{}/Rows", name))
            .with(
                "addColumn",
                format!("/api/Tables/{}/Columns/{{columnName}}/{{columnType}}", name),
            )
            .with("addRow", format!("/api/Tables/{}/Rows", name));

        if !table.columns().is_empty() {
            links = links
                .with(
                    "updateColumn",
                    format!("/api/Tables/{}/Columns/{{oldColumnName}}/{{newColumnName}}", name),
                )
                .with(
                    "deleteColumn",
                    format!("/api/Tables/{}/Columns/{{columnName}}", name),
                );
        }
        if !table.rows().is_empty() {
            links = links
                .with("updateRow", format!("/api/Tables/{}/Rows/{{id}}", name))
                .with("deleteRow", format!("/api/Tables/{}/Rows/{{id}}", name));
        }
        links
    }

    pub fn for_deleted_table() -> Self {
        Self::new()
            .with("tables", "/api/Tables")
            .with("createTable", "/api/Tables/{name}")
    }

    /// One link per column, keyed `"name (type)"`
    pub fn for_columns(table: &str, columns: &[Column]) -> Self {
        columns.iter().fold(Self::new(), |links, c| {
            links.with(
                format!("{} ({})", c.name(), c.column_type()),
                format!("/api/Tables/{}/Columns/{}", table, c.name()),
            )
        })
    }

    pub fn for_column(table: &str, column: &Column) -> Self {
        Self::new()
            .with(
                "updateColumn",
                format!("/api/Tables/{}/Columns/{}/{{newColumnName}}", table, column.name()),
            )
            .with(
                "deleteColumn",
                format!("/api/Tables/{}/Columns/{}", table, column.name()),
            )
    }

    pub fn for_deleted_column(table: &str) -> Self {
        Self::new().with(
            "addColumn",
            format!("/api/Tables/{}/Columns/{{columnName}}/{{columnType}}", table),
        )
    }

    /// One link per row, keyed `"Row {index}"`
    pub fn for_rows(table: &str, row_count: usize) -> Self {
        (0..row_count).fold(Self::new(), |links, i| {
            links.with(format!("Row {}", i), format!("/api/Tables/{}/Rows/{}", table, i))
        })
    }

    pub fn for_row(table: &str, index: usize) -> Self {
        let href = format!("/api/Tables/{}/Rows/{}", table, index);
        Self::new()
            .with("updateRow", href.clone())
            .with("deleteRow", href)
    }

    pub fn for_deleted_row(table: &str) -> Self {
        let href = format!("/api/Tables/{}/Rows", table);
        Self::new().with("rows", href.clone()).with("addRow", href)
    }

    pub fn for_projection(source: &str, projection: &Table) -> Self {
        Self::for_columns(source, projection.columns())
            .with("table", format!("/api/Tables/{}", source))
    }
}
