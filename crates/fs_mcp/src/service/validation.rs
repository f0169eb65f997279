use std::path::PathBuf;

use mcp_stdio_core::WorkspaceRoot;

use crate::errors::FileSystemMcpResult;

pub trait Validate {
    fn validate(&self) -> FileSystemMcpResult<()>;
}

/// Validate that a requested path stays within the workspace root
///
/// Runs before any other I/O for the operation:
/// - Rejects empty paths
/// - Treats `\` as a separator and collapses `.`/`..` against the root
/// - Rejects anything that normalizes outside the root
/// - Canonicalizes the nearest existing ancestor so symlinks cannot escape
///
/// Returns the absolute path the operation should act on.
pub async fn validate_path(
    workspace: &WorkspaceRoot,
    requested_path: &str,
) -> FileSystemMcpResult<PathBuf> {
    match workspace.confine(requested_path).await {
        Ok(path) => Ok(path),
        Err(e) => {
            tracing::warn!(requested = requested_path, "rejected path outside workspace");
            Err(e.into())
        }
    }
}
