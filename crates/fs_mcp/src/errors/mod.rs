use std::io;

use mcp_stdio_core::{CapabilityError, ConfinementError, ErrorKind, ParamsError, WorkspaceError};

/// Result type for filesystem operations
pub type FileSystemMcpResult<T> = Result<T, FileSystemMcpError>;

/// Result type for startup configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Startup errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to get current directory: {0}")]
    CurrentDir(#[from] io::Error),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}

/// Filesystem operation errors
///
/// Messages name the caller's relative path at most, never the resolved
/// absolute one.
#[derive(thiserror::Error, Debug)]
pub enum FileSystemMcpError {
    #[error("Invalid params: {0}")]
    InvalidParams(#[from] ParamsError),
    #[error("{message}")]
    ValidationError { message: String },
    #[error(transparent)]
    Confinement(#[from] ConfinementError),
    #[error("Failed to {operation} '{path}': {source}")]
    Io {
        operation: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl FileSystemMcpError {
    pub fn io(operation: &'static str, path: impl Into<String>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io {
            operation,
            path,
            source,
        }
    }
}

impl CapabilityError for FileSystemMcpError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParams(_) | Self::ValidationError { .. } | Self::Confinement(_) => {
                ErrorKind::Validation
            }
            Self::Io { .. } | Self::Encode(_) => ErrorKind::Effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confinement_message_is_generic() {
        let err: FileSystemMcpError = ConfinementError::OutsideWorkspace {
            requested: "../secret".to_string(),
        }
        .into();

        assert_eq!(err.to_string(), "Path outside workspace not allowed");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_io_error_carries_relative_path_and_cause() {
        let err = FileSystemMcpError::io("read", "a/b.txt")(io::Error::new(
            io::ErrorKind::NotFound,
            "No such file or directory",
        ));

        assert_eq!(
            err.to_string(),
            "Failed to read 'a/b.txt': No such file or directory"
        );
        assert_eq!(err.kind(), ErrorKind::Effect);
    }
}
