use std::sync::Arc;

use async_trait::async_trait;
use mcp_stdio_core::{Capability, Method, Params, ServerInfo, WorkspaceRoot};
use serde_json::Value;

use crate::{
    application::FileService,
    config::Config,
    domain::{FileEntry, FileOperations},
    errors::{FileSystemMcpError, FileSystemMcpResult},
    models::{
        requests::{
            CreateDirectoryRequest, ExistsRequest, ListDirectoryRequest, ReadFileRequest,
            SearchFilesRequest, WriteFileRequest,
        },
        responses::{DirEntry, ExistsResponse, ReadFileResponse, WriteFileResponse},
    },
    service::validation::{Validate, validate_path},
};

/// Methods served by the filesystem capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsMethod {
    List,
    Read,
    Write,
    Search,
    Exists,
    Mkdir,
}

impl Method for FsMethod {
    const ALL: &'static [Self] = &[
        Self::List,
        Self::Read,
        Self::Write,
        Self::Search,
        Self::Exists,
        Self::Mkdir,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::List => "fs/list",
            Self::Read => "fs/read",
            Self::Write => "fs/write",
            Self::Search => "fs/search",
            Self::Exists => "fs/exists",
            Self::Mkdir => "fs/mkdir",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::List => "List the immediate children of a workspace directory (path defaults to '.')",
            Self::Read => "Read a workspace file as UTF-8 text",
            Self::Write => "Create or overwrite a workspace file, creating parent directories",
            Self::Search => "Recursively find entries whose name contains a pattern (case-insensitive)",
            Self::Exists => "Check whether a workspace path exists",
            Self::Mkdir => "Create a workspace directory and any missing parents",
        }
    }
}

/// Filesystem capability
///
/// Every operation confines its path to the workspace root before touching
/// storage. File effects go through the injected [`FileOperations`].
pub struct FileSystemService {
    workspace: WorkspaceRoot,
    file_operations: Arc<dyn FileOperations>,
}

impl FileSystemService {
    /// Create a new FileSystemService backed by the local disk
    pub fn new(config: Config) -> Self {
        Self::with_operations(config, Arc::new(FileService::new()))
    }

    pub fn with_operations(config: Config, file_operations: Arc<dyn FileOperations>) -> Self {
        Self {
            workspace: config.workspace,
            file_operations,
        }
    }

    fn to_dir_entry(&self, entry: FileEntry) -> DirEntry {
        DirEntry {
            path: self.workspace.relative(&entry.path),
            name: entry.name,
            entry_type: entry.kind,
        }
    }

    pub async fn list_directory(
        &self,
        request: ListDirectoryRequest,
    ) -> FileSystemMcpResult<Vec<DirEntry>> {
        let path = validate_path(&self.workspace, request.path()).await?;
        let relative = self.workspace.relative(&path);

        let entries = self
            .file_operations
            .list_directory(&path)
            .await
            .map_err(FileSystemMcpError::io("list", relative))?;

        Ok(entries
            .into_iter()
            .map(|entry| self.to_dir_entry(entry))
            .collect())
    }

    pub async fn read_file(&self, request: ReadFileRequest) -> FileSystemMcpResult<ReadFileResponse> {
        let path = validate_path(&self.workspace, request.path()).await?;
        let relative = self.workspace.relative(&path);

        let content = self
            .file_operations
            .read_text(&path)
            .await
            .map_err(FileSystemMcpError::io("read", relative.clone()))?;

        Ok(ReadFileResponse {
            path: relative,
            content,
        })
    }

    pub async fn write_file(
        &self,
        request: WriteFileRequest,
    ) -> FileSystemMcpResult<WriteFileResponse> {
        let path = validate_path(&self.workspace, request.path()).await?;
        let relative = self.workspace.relative(&path);

        self.file_operations
            .write_text(&path, request.content())
            .await
            .map_err(FileSystemMcpError::io("write", relative.clone()))?;

        tracing::info!(path = %relative, bytes = request.content().len(), "wrote file");
        Ok(WriteFileResponse::succeeded(relative))
    }

    pub async fn search_files(
        &self,
        request: SearchFilesRequest,
    ) -> FileSystemMcpResult<Vec<DirEntry>> {
        request.validate()?;
        let path = validate_path(&self.workspace, request.path()).await?;
        let relative = self.workspace.relative(&path);

        let matches = self
            .file_operations
            .search(&path, request.pattern())
            .await
            .map_err(FileSystemMcpError::io("search", relative))?;

        Ok(matches
            .into_iter()
            .map(|entry| self.to_dir_entry(entry))
            .collect())
    }

    pub async fn exists(&self, request: ExistsRequest) -> FileSystemMcpResult<ExistsResponse> {
        let path = validate_path(&self.workspace, request.path()).await?;

        Ok(ExistsResponse {
            exists: self.file_operations.exists(&path).await,
            path: self.workspace.relative(&path),
        })
    }

    pub async fn create_directory(
        &self,
        request: CreateDirectoryRequest,
    ) -> FileSystemMcpResult<WriteFileResponse> {
        let path = validate_path(&self.workspace, request.path()).await?;
        let relative = self.workspace.relative(&path);

        self.file_operations
            .create_directory(&path)
            .await
            .map_err(FileSystemMcpError::io("create directory", relative.clone()))?;

        tracing::info!(path = %relative, "created directory");
        Ok(WriteFileResponse::succeeded(relative))
    }
}

#[async_trait]
impl Capability for FileSystemService {
    type Method = FsMethod;
    type Error = FileSystemMcpError;

    fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    async fn call(&self, method: FsMethod, params: Params) -> FileSystemMcpResult<Value> {
        let result = match method {
            FsMethod::List => serde_json::to_value(self.list_directory(params.parse()?).await?)?,
            FsMethod::Read => serde_json::to_value(self.read_file(params.parse()?).await?)?,
            FsMethod::Write => serde_json::to_value(self.write_file(params.parse()?).await?)?,
            FsMethod::Search => serde_json::to_value(self.search_files(params.parse()?).await?)?,
            FsMethod::Exists => serde_json::to_value(self.exists(params.parse()?).await?)?,
            FsMethod::Mkdir => {
                serde_json::to_value(self.create_directory(params.parse()?).await?)?
            }
        };
        Ok(result)
    }
}
