use tracing_subscriber::{EnvFilter, prelude::*};

use crate::errors::{RpcError, RpcResult};

/// Initialize logging based on environment configuration
///
/// Logging is skipped entirely unless `RUST_LOG` is set. Output always goes to
/// stderr because stdout carries protocol traffic.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
pub fn init_logging() -> RpcResult<()> {
    if std::env::var("RUST_LOG").is_err() {
        return Ok(());
    }

    let env_filter = EnvFilter::from_default_env();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| RpcError::LoggingInitialization(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_logging_setup() {
        // Without RUST_LOG this is a no-op; with it, the first init wins
        let result = init_logging();
        if std::env::var("RUST_LOG").is_err() {
            assert!(result.is_ok());
        }
    }
}
