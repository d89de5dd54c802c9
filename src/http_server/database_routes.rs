//! Database HTTP Routes
//!
//! Lifecycle of the single database: create, inspect, rename, delete.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use super::errors::ApiResult;
use super::response::{Envelope, Links};
use crate::store::{Database, TableStore};

// ==================
// Database Routes
// ==================

/// Create database routes
pub fn database_routes(store: Arc<TableStore>) -> Router {
    Router::new()
        .route("/Database", get(get_database_handler))
        .route("/Database", delete(delete_database_handler))
        .route("/Database/:name", post(create_database_handler))
        .route("/Database/:name", put(rename_database_handler))
        .with_state(store)
}

// ==================
// Handlers
// ==================

async fn get_database_handler(
    State(store): State<Arc<TableStore>>,
) -> ApiResult<Json<Envelope<Database>>> {
    let database = store.database()?;
    let links = Links::for_database(&database);
    Ok(Json(Envelope::new(database, links)))
}

async fn create_database_handler(
    State(store): State<Arc<TableStore>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Envelope<Database>>> {
    let database = store.create_database(&name)?;
    let links = Links::for_database(&database);
    Ok(Json(Envelope::new(database, links)))
}

async fn rename_database_handler(
    State(store): State<Arc<TableStore>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Envelope<Database>>> {
    let database = store.rename_database(&name)?;
    let links = Links::for_database(&database);
    Ok(Json(Envelope::new(database, links)))
}

async fn delete_database_handler(
    State(store): State<Arc<TableStore>>,
) -> ApiResult<Json<Envelope<Database>>> {
    let removed = store.delete_database()?;
    Ok(Json(Envelope::new(removed, Links::for_deleted_database())))
}
