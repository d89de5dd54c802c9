//! CLI module for tabledb
//!
//! Provides command-line interface for:
//! - serve: Boot the store and serve the HTTP API
//! - check-config: Validate a configuration file

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{boot_store, check_config, run, run_command, serve};
pub use config::ServerConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_json_to};
