//! In-memory typed table store
//!
//! One optional database, holding ordered tables of typed columns and rows.
//!
//! # Invariants
//!
//! - At most one live database; its absence is a checkable state
//! - Table names unique within the database, column names unique within a table
//! - Every row has exactly one cell per column (arity)
//! - Every cell conforms to its column's declared type
//! - Failed operations leave no partial change behind

mod column;
mod database;
mod errors;
mod row;
#[allow(clippy::module_inception)]
mod store;
mod table;

pub use column::Column;
pub use database::Database;
pub use errors::{ErrorKind, StoreError, StoreResult};
pub use row::Row;
pub use store::TableStore;
pub use table::Table;
