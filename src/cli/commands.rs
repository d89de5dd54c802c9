//! CLI command implementations
//!
//! `serve` boots in a fixed order: load config, apply log level, create the
//! boot database if one is configured, bind, then serve until Ctrl-C.

use std::path::Path;
use std::sync::Arc;

use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::store::TableStore;

use super::args::Command;
use super::config::ServerConfig;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => serve(config.as_deref(), host, port),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Boot the store and serve HTTP until Ctrl-C
pub fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = ServerConfig::load_or_default(config_path)?.with_overrides(host, port)?;
    Logger::set_min_severity(config.severity()?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("addr", &config.http.socket_addr()),
            ("log_level", &config.log_level),
        ],
    );

    let store = Arc::new(boot_store(&config)?);
    let server = HttpServer::with_config(config.http, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start()).map_err(|e| {
        let message = e.to_string();
        log_event_with_fields(Event::ServerFailed, &[("error", &message)]);
        CliError::serve_failed(format!("HTTP server failed: {}", message))
    })
}

/// Build the store, creating the configured boot database if any
pub fn boot_store(config: &ServerConfig) -> CliResult<TableStore> {
    let store = TableStore::new();
    if let Some(name) = &config.database {
        store
            .create_database(name)
            .map_err(|e| CliError::boot_failed(format!("Failed to create database: {}", e)))?;
    }
    Ok(store)
}

/// Validate a config file and print the effective configuration
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = ServerConfig::load(config_path)?;
    write_json(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_store_without_database() {
        let store = boot_store(&ServerConfig::default()).unwrap();
        assert!(!store.is_initialized());
    }

    #[test]
    fn test_boot_store_creates_configured_database() {
        let config = ServerConfig {
            database: Some("shop".to_string()),
            ..Default::default()
        };
        let store = boot_store(&config).unwrap();
        assert_eq!(store.database().unwrap().name(), "shop");
    }

    #[test]
    fn test_check_config_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_config(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code_str(), "TABLEDB_CLI_CONFIG_ERROR");
    }
}
