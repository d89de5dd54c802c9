//! CLI argument definitions using clap
//!
//! Commands:
//! - tabledb serve [--config <path>] [--host <host>] [--port <port>]
//! - tabledb check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabledb - An in-memory typed table store served over HTTP
#[derive(Parser, Debug)]
#[command(name = "tabledb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind, overriding the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the config file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a configuration file and print the effective configuration
    CheckConfig {
        /// Path to configuration file
        #[arg(long)]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from(["tabledb", "serve", "--host", "127.0.0.1", "--port", "8080"])
            .unwrap();
        match cli.command {
            Command::Serve { config, host, port } => {
                assert!(config.is_none());
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_config_requires_path() {
        assert!(Cli::try_parse_from(["tabledb", "check-config"]).is_err());
    }
}
