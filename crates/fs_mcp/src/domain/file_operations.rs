use async_trait::async_trait;
use std::{io, path::Path, path::PathBuf};

use crate::models::responses::EntryKind;

/// A directory entry found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path of the entry
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

/// Domain trait for file operations
///
/// Implementations act on absolute paths that have already been confined to
/// the workspace; they never see caller input directly.
#[async_trait]
pub trait FileOperations: Send + Sync {
    /// Immediate children of a directory, sorted by name
    async fn list_directory(&self, path: &Path) -> io::Result<Vec<FileEntry>>;

    /// Entire contents of a regular file as UTF-8 text
    ///
    /// Fails with `InvalidInput` if `path` is not a regular file.
    async fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Create or overwrite a file, creating missing parent directories first
    async fn write_text(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Recursive, case-insensitive substring match on entry names
    ///
    /// Results are in depth-first traversal order.
    async fn search(&self, root: &Path, pattern: &str) -> io::Result<Vec<FileEntry>>;

    /// Existence probe; absence or an unreadable path is `false`, never an error
    async fn exists(&self, path: &Path) -> bool;

    /// Create a directory and any missing ancestors
    async fn create_directory(&self, path: &Path) -> io::Result<()>;
}
