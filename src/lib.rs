//! tabledb - An in-memory typed table store
//!
//! One optional database of named tables. Each table has typed columns and
//! rows addressed by position; every cell conforms to its column's type.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod store;
