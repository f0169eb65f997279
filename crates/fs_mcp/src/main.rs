use mcp_server_workspace_fs::{cli::Cli, handlers::run};
use mcp_stdio_core::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging based on environment
    logging::init_logging()?;

    // Parse CLI arguments
    let config = Cli::parse_config().await?;

    // Run the server until stdin closes
    if let Err(e) = run(config).await {
        tracing::error!("Failed to run filesystem server: {}", e);
        return Err(e);
    }

    Ok(())
}
