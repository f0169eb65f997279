use std::path::PathBuf;

use clap::Parser;
use mcp_stdio_core::WorkspaceRoot;

use crate::config::{Allowlist, Config};
use crate::errors::{ConfigError, ConfigResult};

/// Allowlisted Shell Server
///
/// Serves newline-delimited JSON-RPC on stdin/stdout. Only programs named in
/// the allowlist can run, their first argument is checked when the entry
/// restricts it, and every run is killed after 30 seconds.
///
/// ## Allowlist file
/// ```json
/// { "npm": ["install", "test"], "echo": [] }
/// ```
/// An empty list permits any arguments.
///
/// ## Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-server-shell")]
#[command(about = "A stdio JSON-RPC server that runs allowlisted commands with a hard timeout")]
#[command(version)]
pub struct Cli {
    /// Workspace root and default working directory; defaults to the current directory.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// JSON file replacing the built-in allowlist.
    #[arg(long, value_name = "FILE")]
    pub allowlist: Option<PathBuf>,
}

impl Cli {
    /// Parse CLI arguments and convert to configuration
    pub async fn parse_config() -> ConfigResult<Config> {
        Self::parse().into_config().await
    }

    pub async fn into_config(self) -> ConfigResult<Config> {
        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir().map_err(ConfigError::CurrentDir)?,
        };
        let workspace = WorkspaceRoot::open(root).await?;

        let allowlist = match self.allowlist {
            Some(path) => {
                let raw = tokio::fs::read_to_string(&path).await.map_err(|source| {
                    ConfigError::AllowlistRead {
                        path: path.display().to_string(),
                        source,
                    }
                })?;
                Allowlist::from_json(&raw)?
            }
            None => Allowlist::default(),
        };

        tracing::debug!(commands = allowlist.len(), "allowlist loaded");
        Ok(Config::new(workspace, allowlist))
    }
}
