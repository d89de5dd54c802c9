//! Row HTTP Routes
//!
//! Rows are addressed by position. Bodies carry one raw JSON value per
//! column, in column order.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::response::{Envelope, Links};
use super::table_routes::reserved_table_name;
use crate::store::{Row, TableStore};

// ==================
// Request Types
// ==================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RowValuesRequest {
    pub values: Vec<Value>,
}

/// Create row routes
pub fn row_routes(store: Arc<TableStore>) -> Router {
    Router::new()
        .route("/Tables/:table/Rows", get(list_rows_handler))
        .route("/Tables/:table/Rows", post(insert_row_handler))
        .route("/Tables/:table/Rows", put(rename_to_rows_handler))
        .route("/Tables/:table/Rows/:id", get(get_row_handler))
        .route("/Tables/:table/Rows/:id", put(update_row_handler))
        .route("/Tables/:table/Rows/:id", delete(delete_row_handler))
        .with_state(store)
}

// ==================
// Handlers
// ==================

async fn rename_to_rows_handler() -> ApiError {
    reserved_table_name("Rows")
}

async fn list_rows_handler(
    State(store): State<Arc<TableStore>>,
    Path(table): Path<String>,
) -> ApiResult<Json<Envelope<Vec<Row>>>> {
    let rows = store.list_rows(&table)?;
    let links = Links::for_rows(&table, rows.len());
    Ok(Json(Envelope::new(rows, links)))
}

async fn get_row_handler(
    State(store): State<Arc<TableStore>>,
    Path((table, id)): Path<(String, usize)>,
) -> ApiResult<Json<Envelope<Row>>> {
    let row = store.row(&table, id)?;
    Ok(Json(Envelope::new(row, Links::for_row(&table, id))))
}

async fn insert_row_handler(
    State(store): State<Arc<TableStore>>,
    Path(table): Path<String>,
    Json(request): Json<RowValuesRequest>,
) -> ApiResult<Json<Envelope<Row>>> {
    let (index, row) = store.insert_row(&table, &request.values)?;
    Ok(Json(Envelope::new(row, Links::for_row(&table, index))))
}

async fn update_row_handler(
    State(store): State<Arc<TableStore>>,
    Path((table, id)): Path<(String, usize)>,
    Json(request): Json<RowValuesRequest>,
) -> ApiResult<Json<Envelope<Row>>> {
    let row = store.update_row(&table, id, &request.values)?;
    Ok(Json(Envelope::new(row, Links::for_row(&table, id))))
}

async fn delete_row_handler(
    State(store): State<Arc<TableStore>>,
    Path((table, id)): Path<(String, usize)>,
) -> ApiResult<Json<Envelope<Row>>> {
    let removed = store.delete_row(&table, id)?;
    Ok(Json(Envelope::new(removed, Links::for_deleted_row(&table))))
}
