pub mod fs_tools;

pub use fs_tools::{FileSystemService, FsMethod};

use crate::config::Config;

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(root = %config.workspace.path().display(), "starting filesystem server");

    mcp_stdio_core::serve_stdio(FileSystemService::new(config))
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    Ok(())
}
