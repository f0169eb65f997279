use std::path::PathBuf;

use clap::Parser;
use mcp_stdio_core::WorkspaceRoot;

use crate::config::Config;
use crate::errors::ConfigResult;

/// Workspace Filesystem Server
///
/// Serves newline-delimited JSON-RPC on stdin/stdout. Every path a caller
/// supplies is resolved against the workspace root and rejected if it would
/// leave it.
///
/// ## Usage
/// ```bash
/// echo '{"id":1,"method":"fs/list","params":{"path":"."}}' | mcp-server-workspace-fs /workspace
/// ```
///
/// ## Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-server-workspace-fs")]
#[command(about = "A stdio JSON-RPC server for filesystem access confined to one workspace")]
#[command(version)]
pub struct Cli {
    /// Workspace root; defaults to the current directory.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,
}

impl Cli {
    /// Parse CLI arguments and convert to configuration
    pub async fn parse_config() -> ConfigResult<Config> {
        Self::parse().into_config().await
    }

    pub async fn into_config(self) -> ConfigResult<Config> {
        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let workspace = WorkspaceRoot::open(root).await?;
        Ok(Config { workspace })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_into_config_canonicalizes_root() {
        let temp_dir = TempDir::new().unwrap();
        let cli = Cli {
            root: Some(temp_dir.path().to_path_buf()),
        };

        let config = cli.into_config().await.unwrap();
        assert_eq!(
            config.workspace.path(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_into_config_rejects_missing_root() {
        let cli = Cli {
            root: Some(PathBuf::from("/this/path/does/not/exist")),
        };

        assert!(matches!(
            cli.into_config().await,
            Err(ConfigError::Workspace(_))
        ));
    }

    #[test]
    fn test_cli_parses_positional_root() {
        let cli = Cli::try_parse_from(["mcp-server-workspace-fs", "/srv/ws"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/srv/ws")));

        let cli = Cli::try_parse_from(["mcp-server-workspace-fs"]).unwrap();
        assert!(cli.root.is_none());
    }
}
