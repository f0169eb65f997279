//! Workspace-root confinement
//!
//! Every caller-supplied path is resolved against a single canonical root and
//! rejected unless it stays inside it. Containment is first checked lexically
//! (no I/O), then against the real location of the nearest existing ancestor so
//! a symlink inside the workspace cannot point the operation elsewhere.
//!
//! Rejections never carry the resolved absolute path.

use std::{
    io,
    path::{Component, Path, PathBuf},
};

use tokio::fs;

/// Errors raised while opening the workspace root at startup
#[derive(thiserror::Error, Debug)]
pub enum WorkspaceError {
    #[error("Workspace root does not exist: {path}")]
    NotFound { path: String },
    #[error("Workspace root is not a directory: {path}")]
    NotADirectory { path: String },
    #[error("Permission denied for workspace root {path}: {source}")]
    PermissionDenied {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Rejections produced while confining a requested path
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfinementError {
    #[error("Path must not be empty")]
    Empty,
    #[error("Path outside workspace not allowed")]
    OutsideWorkspace { requested: String },
}

/// The single directory all path-taking operations are confined to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
    root: PathBuf,
}

impl WorkspaceRoot {
    /// Canonicalize `path` and check that it is a readable directory
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        let path = path.as_ref();
        let root = fs::canonicalize(path).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                WorkspaceError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                WorkspaceError::PermissionDenied {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;

        let metadata =
            fs::metadata(&root)
                .await
                .map_err(|e| WorkspaceError::PermissionDenied {
                    path: root.display().to_string(),
                    source: e,
                })?;
        if !metadata.is_dir() {
            return Err(WorkspaceError::NotADirectory {
                path: root.display().to_string(),
            });
        }

        if let Err(e) = fs::read_dir(&root).await {
            return Err(WorkspaceError::PermissionDenied {
                path: root.display().to_string(),
                source: e,
            });
        }

        tracing::debug!(root = %root.display(), "workspace root validated");
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Lexically resolve `requested` against the root
    ///
    /// Both `/` and `\` count as separators. The result is absolute and free of
    /// `.`/`..` segments; it is returned only if it equals the root or lies
    /// beneath it.
    pub fn resolve(&self, requested: &str) -> Result<PathBuf, ConfinementError> {
        if requested.is_empty() {
            return Err(ConfinementError::Empty);
        }

        let unified = requested.replace('\\', "/");
        let normalized = normalize_path(&self.root.join(unified));

        if normalized.starts_with(&self.root) {
            Ok(normalized)
        } else {
            Err(ConfinementError::OutsideWorkspace {
                requested: requested.to_string(),
            })
        }
    }

    /// Resolve `requested` and verify its real location stays inside the root
    ///
    /// The nearest existing ancestor is canonicalized; a dangling symlink on the
    /// way is treated as an escape since its target cannot be checked.
    pub async fn confine(&self, requested: &str) -> Result<PathBuf, ConfinementError> {
        let resolved = self.resolve(requested)?;
        let outside = || ConfinementError::OutsideWorkspace {
            requested: requested.to_string(),
        };

        let mut probe = resolved.as_path();
        loop {
            match fs::canonicalize(probe).await {
                Ok(real) if real.starts_with(&self.root) => return Ok(resolved),
                Ok(_) => return Err(outside()),
                Err(_) => {
                    if fs::symlink_metadata(probe).await.is_ok() {
                        return Err(outside());
                    }
                    match probe.parent() {
                        Some(parent) if parent.starts_with(&self.root) => probe = parent,
                        // Root itself is unreadable; let the operation report it
                        _ => return Ok(resolved),
                    }
                }
            }
        }
    }

    /// Render an absolute path under the root as a `/`-separated relative path
    ///
    /// The root itself renders as `"."`.
    pub fn relative(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let parts: Vec<String> = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect();

        if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        }
    }
}

/// Collapse `.` and `..` components without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .fold(PathBuf::new(), |mut result, component| {
            match component {
                Component::ParentDir => {
                    result.pop();
                }
                Component::CurDir => {}
                _ => {
                    result.push(component);
                }
            }
            result
        })
}
