//! Column HTTP Routes
//!
//! Columns are addressed by name over HTTP and resolved to positions inside
//! the store.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use super::response::{Envelope, Links};
use super::table_routes::reserved_table_name;
use crate::store::{Column, TableStore};

/// Create column routes
pub fn column_routes(store: Arc<TableStore>) -> Router {
    // The last segment is a type token on POST and a new name on PUT.
    Router::new()
        .route("/Tables/:table/Columns", get(list_columns_handler))
        .route("/Tables/:table/Columns", put(rename_to_columns_handler))
        .route("/Tables/:table/Columns/:column", get(get_column_handler))
        .route("/Tables/:table/Columns/:column", delete(delete_column_handler))
        .route("/Tables/:table/Columns/:column/:arg", post(create_column_handler))
        .route("/Tables/:table/Columns/:column/:arg", put(rename_column_handler))
        .with_state(store)
}

async fn rename_to_columns_handler() -> ApiError {
    reserved_table_name("Columns")
}

async fn list_columns_handler(
    State(store): State<Arc<TableStore>>,
    Path(table): Path<String>,
) -> ApiResult<Json<Envelope<Vec<Column>>>> {
    let columns = store.list_columns(&table)?;
    let links = Links::for_columns(&table, &columns);
    Ok(Json(Envelope::new(columns, links)))
}

async fn get_column_handler(
    State(store): State<Arc<TableStore>>,
    Path((table, column)): Path<(String, String)>,
) -> ApiResult<Json<Envelope<Column>>> {
    let column = store.column(&table, &column)?;
    let links = Links::for_column(&table, &column);
    Ok(Json(Envelope::new(column, links)))
}

async fn create_column_handler(
    State(store): State<Arc<TableStore>>,
    Path((table, column, type_token)): Path<(String, String, String)>,
) -> ApiResult<Json<Envelope<Column>>> {
    let column = store.add_column(&table, &column, &type_token)?;
    let links = Links::for_column(&table, &column);
    Ok(Json(Envelope::new(column, links)))
}

async fn rename_column_handler(
    State(store): State<Arc<TableStore>>,
    Path((table, column, new_name)): Path<(String, String, String)>,
) -> ApiResult<Json<Envelope<Column>>> {
    let column = store.rename_column(&table, &column, &new_name)?;
    let links = Links::for_column(&table, &column);
    Ok(Json(Envelope::new(column, links)))
}

async fn delete_column_handler(
    State(store): State<Arc<TableStore>>,
    Path((table, column)): Path<(String, String)>,
) -> ApiResult<Json<Envelope<Column>>> {
    let removed = store.delete_column_by_name(&table, &column)?;
    Ok(Json(Envelope::new(removed, Links::for_deleted_column(&table))))
}
