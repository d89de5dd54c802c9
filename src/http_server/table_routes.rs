//! Table HTTP Routes
//!
//! Table management and column projection.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use super::response::{Envelope, Links};
use crate::store::{Table, TableStore};

/// Create table routes
pub fn table_routes(store: Arc<TableStore>) -> Router {
    Router::new()
        .route("/Tables", get(list_tables_handler))
        .route("/Tables/:table", get(get_table_handler))
        .route("/Tables/:table", post(create_table_handler))
        .route("/Tables/:table", delete(delete_table_handler))
        .route("/Tables/:table/:new_name", put(rename_table_handler))
        .route("/Tables/Project/:table/:columns", get(project_handler))
        .with_state(store)
}

/// Answer for `PUT /Tables/:table/Columns` and `PUT /Tables/:table/Rows`,
/// whose last segment is taken by the column and row routes.
pub fn reserved_table_name(name: &str) -> ApiError {
    ApiError::BadRequest(format!(
        "'{}' is reserved by the /api/Tables/:table/{} routes and cannot be used as a new table name",
        name, name
    ))
}

/// Splits a comma-separated column list, dropping all spaces.
///
/// `"name, age"` becomes `["name", "age"]`. Empty segments are kept so
/// that they fail name resolution instead of silently vanishing.
pub fn parse_column_list(raw: &str) -> Result<Vec<String>, ApiError> {
    let stripped: String = raw.chars().filter(|c| *c != ' ').collect();
    if stripped.is_empty() {
        return Err(ApiError::BadRequest("no columns requested".to_string()));
    }
    Ok(stripped.split(',').map(str::to_string).collect())
}

// ==================
// Handlers
// ==================

async fn list_tables_handler(
    State(store): State<Arc<TableStore>>,
) -> ApiResult<Json<Envelope<Vec<Table>>>> {
    let tables = store.list_tables()?;
    let links = Links::for_tables(&tables);
    Ok(Json(Envelope::new(tables, links)))
}

async fn get_table_handler(
    State(store): State<Arc<TableStore>>,
    Path(table): Path<String>,
) -> ApiResult<Json<Envelope<Table>>> {
    let table = store.table(&table)?;
    let links = Links::for_table(&table);
    Ok(Json(Envelope::new(table, links)))
}

async fn create_table_handler(
    State(store): State<Arc<TableStore>>,
    Path(table): Path<String>,
) -> ApiResult<Json<Envelope<Table>>> {
    let table = store.add_table(&table)?;
    let links = Links::for_table(&table);
    Ok(Json(Envelope::new(table, links)))
}

async fn rename_table_handler(
    State(store): State<Arc<TableStore>>,
    Path((table, new_name)): Path<(String, String)>,
) -> ApiResult<Json<Envelope<Table>>> {
    let table = store.rename_table(&table, &new_name)?;
    let links = Links::for_table(&table);
    Ok(Json(Envelope::new(table, links)))
}

async fn delete_table_handler(
    State(store): State<Arc<TableStore>>,
    Path(table): Path<String>,
) -> ApiResult<Json<Envelope<Table>>> {
    let removed = store.delete_table(&table)?;
    Ok(Json(Envelope::new(removed, Links::for_deleted_table())))
}

async fn project_handler(
    State(store): State<Arc<TableStore>>,
    Path((table, columns)): Path<(String, String)>,
) -> ApiResult<Json<Envelope<Table>>> {
    let names = parse_column_list(&columns)?;
    let projection = store.project_by_name(&table, &names)?;
    let links = Links::for_projection(&table, &projection);
    Ok(Json(Envelope::new(projection, links)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_name_error_names_the_segment() {
        let err = reserved_table_name("Rows");
        assert_eq!(err.code(), "TABLEDB_BAD_REQUEST");
        assert!(err.to_string().contains("'Rows' is reserved"));
    }

    #[test]
    fn test_parse_column_list_strips_spaces() {
        assert_eq!(
            parse_column_list("name, age ,id").unwrap(),
            vec!["name", "age", "id"]
        );
    }

    #[test]
    fn test_parse_column_list_keeps_repeats_and_order() {
        assert_eq!(parse_column_list("b,a,b").unwrap(), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_parse_column_list_rejects_blank() {
        assert!(parse_column_list("  ").is_err());
    }

    #[test]
    fn test_parse_column_list_keeps_empty_segment() {
        assert_eq!(parse_column_list("a,,b").unwrap(), vec!["a", "", "b"]);
    }
}
