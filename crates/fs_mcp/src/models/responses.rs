use serde::Serialize;

/// Kind of a directory entry as reported on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One directory entry; `path` is relative to the workspace root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryKind,
    pub path: String,
}

/// Response for `fs/read`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadFileResponse {
    pub path: String,
    pub content: String,
}

/// Response for `fs/write` and `fs/mkdir`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteFileResponse {
    pub path: String,
    pub success: bool,
}

impl WriteFileResponse {
    pub fn succeeded(path: String) -> Self {
        Self {
            path,
            success: true,
        }
    }
}

/// Response for `fs/exists`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
    pub path: String,
}
