//! # HTTP Server Module
//!
//! JSON-over-HTTP façade for the table store, built on axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/Database*` - Database lifecycle
//! - `/api/Tables*` - Tables, columns, rows and projection
//! - `/observability/*` - Metrics and monitoring

pub mod column_routes;
pub mod config;
pub mod database_routes;
pub mod errors;
pub mod observability_routes;
pub mod response;
pub mod row_routes;
pub mod server;
pub mod table_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use response::{Envelope, Links};
pub use server::{HttpServer, REQUEST_ID_HEADER};
