use async_recursion::async_recursion;
use async_trait::async_trait;
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

use crate::{
    domain::{FileEntry, FileOperations},
    models::responses::EntryKind,
};

/// Application service implementing file operations on the local disk
pub struct FileService;

impl FileService {
    /// Create a new FileService instance
    pub fn new() -> Self {
        Self
    }

    /// Describe a directory entry, following a symlink only to report its kind
    ///
    /// The returned flag is true for real directories the search may descend
    /// into; symlinked directories are never traversed.
    async fn describe(entry: &fs::DirEntry) -> io::Result<(FileEntry, bool)> {
        let file_type = entry.file_type().await?;
        let path = entry.path();

        let is_directory = if file_type.is_symlink() {
            fs::metadata(&path)
                .await
                .map(|metadata| metadata.is_dir())
                .unwrap_or(false)
        } else {
            file_type.is_dir()
        };

        let found = FileEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind: if is_directory {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            path,
        };
        Ok((found, file_type.is_dir()))
    }

    /// Helper method to ensure parent directory exists
    async fn ensure_parent_dir(path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && fs::metadata(parent).await.is_err()
        {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Recursive helper for name search
    ///
    /// Subdirectories and entries that cannot be read are skipped; only the
    /// starting directory must be readable.
    #[async_recursion]
    async fn search_recursive(
        dir: &Path,
        needle: &str,
        matches: &mut Vec<FileEntry>,
    ) -> io::Result<()> {
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let (found, descend) = match Self::describe(&entry).await {
                Ok(described) => described,
                Err(e) => {
                    tracing::debug!(entry = %entry.path().display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let child: PathBuf = found.path.clone();

            if found.name.to_lowercase().contains(needle) {
                matches.push(found);
            }

            if descend
                && let Err(e) = Self::search_recursive(&child, needle, matches).await
            {
                tracing::debug!(dir = %child.display(), error = %e, "skipping unreadable directory");
            }
        }

        Ok(())
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileOperations for FileService {
    async fn list_directory(&self, path: &Path) -> io::Result<Vec<FileEntry>> {
        let mut entries = fs::read_dir(path).await?;
        let mut listed = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let (found, _) = Self::describe(&entry).await?;
            listed.push(found);
        }

        listed.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listed)
    }

    async fn read_text(&self, path: &Path) -> io::Result<String> {
        let metadata = fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }

        fs::read_to_string(path).await
    }

    async fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        Self::ensure_parent_dir(path).await?;
        fs::write(path, content).await
    }

    async fn search(&self, root: &Path, pattern: &str) -> io::Result<Vec<FileEntry>> {
        let needle = pattern.to_lowercase();
        let mut matches = Vec::new();
        Self::search_recursive(root, &needle, &mut matches).await?;
        Ok(matches)
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }

    async fn create_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }
}
