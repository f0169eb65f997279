use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;

use crate::errors::ShellResult;

/// A fully validated process launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Canonical allowlist name of the program
    pub program: String,
    pub args: Vec<String>,
    /// Absolute working directory inside the workspace
    pub cwd: PathBuf,
}

/// Captured result of a process that exited on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Domain trait for running processes
///
/// Implementations must produce exactly one terminal outcome per call: the
/// process exits, or it is killed when `timeout` elapses and the call fails
/// with [`crate::errors::ShellError::Timeout`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation, timeout: Duration) -> ShellResult<ProcessOutput>;
}
