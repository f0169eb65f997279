pub mod shell_tools;

pub use shell_tools::{ShellMethod, ShellService};

use crate::config::Config;

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        root = %config.workspace.path().display(),
        commands = config.allowlist.len(),
        timeout = ?config.timeout,
        "starting shell server"
    );

    mcp_stdio_core::serve_stdio(ShellService::new(config))
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    Ok(())
}
