use std::{io, time::Duration};

use mcp_stdio_core::{CapabilityError, ConfinementError, ErrorKind, ParamsError, WorkspaceError};

/// Result type for shell operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Result type for startup configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Startup errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to get current directory: {0}")]
    CurrentDir(#[source] io::Error),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error("Failed to read allowlist file {path}: {source}")]
    AllowlistRead {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid allowlist: {0}")]
    AllowlistParse(#[source] serde_json::Error),
    #[error("Allowlist contains an empty command name")]
    EmptyCommand,
    #[error("Allowlist lists '{command}' more than once")]
    DuplicateCommand { command: String },
}

/// Shell operation errors
#[derive(thiserror::Error, Debug)]
pub enum ShellError {
    #[error("Invalid params: {0}")]
    InvalidParams(#[from] ParamsError),
    #[error("Command '{command}' not allowed")]
    CommandNotAllowed { command: String },
    #[error("Command '{command}' with argument '{argument}' not allowed")]
    ArgumentNotAllowed { command: String, argument: String },
    #[error(transparent)]
    Confinement(#[from] ConfinementError),
    #[error("Failed to execute command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while running command '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Command '{command}' timed out after {secs}s", secs = .timeout.as_secs_f64())]
    Timeout { command: String, timeout: Duration },
    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CapabilityError for ShellError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParams(_)
            | Self::CommandNotAllowed { .. }
            | Self::ArgumentNotAllowed { .. }
            | Self::Confinement(_) => ErrorKind::Validation,
            Self::Spawn { .. } | Self::Io { .. } | Self::Encode(_) => ErrorKind::Effect,
            Self::Timeout { .. } => ErrorKind::Timeout,
        }
    }
}
