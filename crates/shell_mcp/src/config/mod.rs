mod allowlist;

pub use allowlist::Allowlist;

use std::time::Duration;

use mcp_stdio_core::WorkspaceRoot;

/// Wall-clock ceiling for a single `shell/exec`
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub workspace: WorkspaceRoot,
    pub allowlist: Allowlist,
    pub timeout: Duration,
}

impl Config {
    pub fn new(workspace: WorkspaceRoot, allowlist: Allowlist) -> Self {
        Self {
            workspace,
            allowlist,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
