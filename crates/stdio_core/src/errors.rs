use crate::protocol::ErrorObject;

/// JSON-RPC code for input that is not valid JSON
pub const PARSE_ERROR: i64 = -32700;
/// Generic server error code shared by every dispatch and capability failure
pub const SERVER_ERROR: i64 = -32000;

/// Coarse classification of a capability failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any effect ran (sandbox escape, disallowed command, bad params)
    Validation,
    /// Underlying I/O or process failure after validation passed
    Effect,
    /// Child process exceeded the execution ceiling and was killed
    Timeout,
}

/// Error type a capability handler returns
///
/// The `Display` text becomes the wire `message`; `kind` only drives logging.
pub trait CapabilityError: std::error::Error + Send + Sync + 'static {
    fn kind(&self) -> ErrorKind;
}

/// Dispatcher-level errors
#[derive(thiserror::Error, Debug)]
pub enum RpcError {
    #[error("Parse error")]
    Parse(#[source] serde_json::Error),
    #[error("Unknown method: {0}")]
    UnknownMethod(String),
    #[error("{message}")]
    Capability { kind: ErrorKind, message: String },
    #[error("Internal error while handling {method}")]
    HandlerPanicked { method: &'static str },
    #[error("Failed to serialize response: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("Transport I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
}

impl RpcError {
    /// Capture a capability failure as a dispatcher error
    pub fn from_capability<E: CapabilityError>(err: &E) -> Self {
        Self::Capability {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Wire code for this error
    pub fn code(&self) -> i64 {
        match self {
            RpcError::Parse(_) => PARSE_ERROR,
            _ => SERVER_ERROR,
        }
    }
}

impl From<&RpcError> for ErrorObject {
    fn from(err: &RpcError) -> Self {
        ErrorObject {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

pub type RpcResult<T> = Result<T, RpcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(thiserror::Error, Debug)]
    #[error("Command 'rm' not allowed")]
    struct Rejected;

    impl CapabilityError for Rejected {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Validation
        }
    }

    #[test]
    fn test_parse_error_uses_parse_code() {
        let err = RpcError::Parse(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        let object = ErrorObject::from(&err);

        assert_eq!(object.code, PARSE_ERROR);
        assert_eq!(object.message, "Parse error");
    }

    #[test]
    fn test_capability_error_keeps_message_and_kind() {
        let err = RpcError::from_capability(&Rejected);
        assert!(matches!(
            err,
            RpcError::Capability {
                kind: ErrorKind::Validation,
                ..
            }
        ));

        let object = ErrorObject::from(&err);
        assert_eq!(object.code, SERVER_ERROR);
        assert_eq!(object.message, "Command 'rm' not allowed");
    }

    #[test]
    fn test_unknown_method_message() {
        let err = RpcError::UnknownMethod("fs/delete".to_string());
        assert_eq!(err.to_string(), "Unknown method: fs/delete");
        assert_eq!(err.code(), SERVER_ERROR);
    }
}
