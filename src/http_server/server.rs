//! # HTTP Server
//!
//! Combines every endpoint router around one shared `TableStore`.

use std::io;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use uuid::Uuid;

use super::column_routes::column_routes;
use super::config::HttpServerConfig;
use super::database_routes::database_routes;
use super::observability_routes::{health_routes, observability_routes};
use super::row_routes::row_routes;
use super::table_routes::table_routes;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::store::TableStore;

/// Response header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP server for the table store
pub struct HttpServer {
    config: HttpServerConfig,
    store: Arc<TableStore>,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over an empty store with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default(), Arc::new(TableStore::new()))
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, store: Arc<TableStore>) -> Self {
        let router = Self::build_router(&config, store.clone());
        Self {
            config,
            store,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Arc<TableStore>) -> Router {
        let cors = if config.allows_any_origin() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let api = Router::new()
            .merge(database_routes(store.clone()))
            .merge(table_routes(store.clone()))
            .merge(column_routes(store.clone()))
            .merge(row_routes(store.clone()));

        Router::new()
            .merge(health_routes())
            .nest("/observability", observability_routes(store.metrics().clone()))
            .nest("/api", api)
            .layer(middleware::from_fn_with_state(store, track_request))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The store this server fronts
    pub fn store(&self) -> &Arc<TableStore> {
        &self.store
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and serve until Ctrl-C
    pub async fn start(self) -> Result<(), io::Error> {
        let listener = TcpListener::bind(self.config.bind_addr()?).await?;
        let local = listener.local_addr()?.to_string();
        log_event_with_fields(Event::ServerListening, &[("addr", &local)]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tags each request with a fresh id, counts it, and logs its outcome.
async fn track_request(
    State(store): State<Arc<TableStore>>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    store.metrics().increment_http_requests();
    log_event_with_fields(
        Event::HttpRequest,
        &[
            ("method", &method),
            ("path", &path),
            ("request_id", &request_id),
            ("status", response.status().as_str()),
        ],
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        log_event(Event::ShutdownStart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new();
        assert_eq!(server.socket_addr(), "0.0.0.0:54330");
        assert!(!server.store().is_initialized());
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig {
            port: 8080,
            ..Default::default()
        };
        let server = HttpServer::with_config(config, Arc::new(TableStore::new()));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_origin_list() {
        let config = HttpServerConfig {
            cors_origins: vec!["https://admin.example".to_string()],
            ..Default::default()
        };
        let server = HttpServer::with_config(config, Arc::new(TableStore::new()));
        let _router = server.router();
    }
}
