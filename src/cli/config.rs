//! Server configuration file
//!
//! A JSON document whose every field is optional:
//!
//! ```json
//! {
//!   "host": "0.0.0.0",
//!   "port": 54330,
//!   "cors_origins": [],
//!   "log_level": "info",
//!   "database": "shop"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Effective server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address and CORS settings
    #[serde(flatten)]
    pub http: HttpServerConfig,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Database to create at boot, if any
    #[serde(default)]
    pub database: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            log_level: default_log_level(),
            database: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: ServerConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> CliResult<Self> {
        if let Some(host) = host {
            self.http.host = host;
        }
        if let Some(port) = port {
            self.http.port = port;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        self.severity()?;

        if let Some(name) = &self.database {
            if name.trim().is_empty() {
                return Err(CliError::config_error("database name must not be empty"));
            }
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }
}
