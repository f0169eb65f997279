use derive_getters::Getters;
use serde::Deserialize;

use crate::{
    errors::{FileSystemMcpError, FileSystemMcpResult},
    service::validation::Validate,
};

const WORKSPACE_ROOT: &str = ".";

/// Request to list a directory
#[derive(Debug, Default, Deserialize)]
pub struct ListDirectoryRequest {
    /// Directory to list, relative to the workspace root (defaults to the root)
    path: Option<String>,
}

impl ListDirectoryRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(WORKSPACE_ROOT)
    }
}

/// Request to read a text file
#[derive(Debug, Deserialize, Getters)]
pub struct ReadFileRequest {
    /// Path to the file to read
    path: String,
}

impl ReadFileRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Request to create or overwrite a file
#[derive(Debug, Deserialize, Getters)]
pub struct WriteFileRequest {
    /// Path of the file to write
    path: String,
    /// Full new content of the file
    content: String,
}

impl WriteFileRequest {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Request to search entry names below a directory
#[derive(Debug, Deserialize)]
pub struct SearchFilesRequest {
    /// Case-insensitive substring matched against entry names
    pattern: String,
    /// Directory to search from (defaults to the root)
    path: Option<String>,
}

impl SearchFilesRequest {
    pub fn new(pattern: impl Into<String>, path: Option<String>) -> Self {
        Self {
            pattern: pattern.into(),
            path,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(WORKSPACE_ROOT)
    }
}

impl Validate for SearchFilesRequest {
    fn validate(&self) -> FileSystemMcpResult<()> {
        if self.pattern.is_empty() {
            return Err(FileSystemMcpError::ValidationError {
                message: "Search pattern must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Request to probe whether a path exists
#[derive(Debug, Deserialize, Getters)]
pub struct ExistsRequest {
    /// Path to probe
    path: String,
}

impl ExistsRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Request to create a directory and its missing ancestors
#[derive(Debug, Deserialize, Getters)]
pub struct CreateDirectoryRequest {
    /// Directory path to create
    path: String,
}

impl CreateDirectoryRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}
