use mcp_stdio_core::WorkspaceRoot;

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub workspace: WorkspaceRoot,
}
