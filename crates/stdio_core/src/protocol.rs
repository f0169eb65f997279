use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::errors::{RpcError, RpcResult};

pub const JSONRPC_VERSION: &str = "2.0";

/// A single inbound request line
///
/// `id` is opaque and echoed back untouched; an absent id becomes `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: Value,
    pub method: Option<String>,
    pub params: Option<Value>,
}

impl Request {
    /// Parse one line of input
    pub fn parse(line: &[u8]) -> RpcResult<Self> {
        let value: Value = serde_json::from_slice(line).map_err(RpcError::Parse)?;
        Ok(Self::from_value(value))
    }

    /// Extract the request fields from an already-parsed JSON document
    ///
    /// Anything that is not an object yields a request with no method, which
    /// the dispatcher rejects as an unknown method.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => Self {
                id: map.remove("id").unwrap_or(Value::Null),
                method: match map.remove("method") {
                    Some(Value::String(method)) => Some(method),
                    _ => None,
                },
                params: map.remove("params"),
            },
            _ => Self {
                id: Value::Null,
                method: None,
                params: None,
            },
        }
    }
}

/// Errors raised while decoding request params into a typed request
#[derive(thiserror::Error, Debug)]
pub enum ParamsError {
    #[error("expected an object, got {0}")]
    NotAnObject(&'static str),
    #[error(transparent)]
    Invalid(#[from] serde_json::Error),
}

/// Raw request params, decoded lazily by the handler that owns the schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Option<Value>);

impl Params {
    pub fn new(raw: Option<Value>) -> Self {
        Self(raw)
    }

    /// Decode into `T`, treating absent or `null` params as an empty object
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, ParamsError> {
        let object = match self.0 {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => return Err(ParamsError::NotAnObject(json_type_name(&other))),
        };
        Ok(serde_json::from_value(Value::Object(object))?)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Wire error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
}

/// Exactly one of `result` or `error`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(ErrorObject),
}

/// A single outbound response line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: Outcome::Result(result),
        }
    }

    pub fn failure(id: Value, err: &RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: Outcome::Error(err.into()),
        }
    }

    /// Serialize as a single JSON line without the trailing newline
    pub fn to_line(&self) -> RpcResult<String> {
        serde_json::to_string(self).map_err(RpcError::Serialization)
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorObject> {
        match &self.outcome {
            Outcome::Result(_) => None,
            Outcome::Error(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{PARSE_ERROR, SERVER_ERROR};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct PathRequest {
        path: Option<String>,
    }

    #[test]
    fn test_request_parse_extracts_fields() {
        let request =
            Request::parse(br#"{"id":"abc","method":"fs/list","params":{"path":"."}}"#).unwrap();

        assert_eq!(request.id, json!("abc"));
        assert_eq!(request.method.as_deref(), Some("fs/list"));
        assert_eq!(request.params, Some(json!({"path": "."})));
    }

    #[test]
    fn test_request_without_id_echoes_null() {
        let request = Request::parse(br#"{"method":"shell/allowed"}"#).unwrap();
        assert_eq!(request.id, Value::Null);
    }

    #[test]
    fn test_request_non_string_method_is_dropped() {
        let request = Request::parse(br#"{"id":3,"method":42}"#).unwrap();
        assert_eq!(request.id, json!(3));
        assert!(request.method.is_none());

        let request = Request::parse(b"[1,2,3]").unwrap();
        assert_eq!(request.id, Value::Null);
        assert!(request.method.is_none());
    }

    #[test]
    fn test_request_parse_rejects_malformed_json() {
        assert!(matches!(
            Request::parse(b"{\"id\":1,"),
            Err(RpcError::Parse(_))
        ));
        assert!(matches!(Request::parse(b""), Err(RpcError::Parse(_))));
        assert!(matches!(
            Request::parse(&[0xff, 0xfe, b'{']),
            Err(RpcError::Parse(_))
        ));
    }

    #[test]
    fn test_params_defaults_and_type_errors() {
        let parsed: PathRequest = Params::new(None).parse().unwrap();
        assert!(parsed.path.is_none());

        let parsed: PathRequest = Params::new(Some(Value::Null)).parse().unwrap();
        assert!(parsed.path.is_none());

        let err = Params::new(Some(json!(["a"])))
            .parse::<PathRequest>()
            .unwrap_err();
        assert_eq!(err.to_string(), "expected an object, got array");
    }

    #[test]
    fn test_response_shapes() {
        let ok = Response::success(json!(1), json!([]));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"jsonrpc": "2.0", "id": 1, "result": []})
        );
        assert!(ok.error().is_none());

        let err = Response::failure(json!(null), &RpcError::UnknownMethod("nope".into()));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": SERVER_ERROR, "message": "Unknown method: nope"}
            })
        );
        assert!(err.result().is_none());
    }

    #[test]
    fn test_response_line_is_single_line() {
        let response = Response::success(json!(7), json!({"content": "a\nb"}));
        let line = response.to_line().unwrap();
        assert!(!line.contains('\n'));

        let back: Response = serde_json::from_str(&line).unwrap();
        assert_eq!(back, response);

        let parse_failure = Response::failure(
            Value::Null,
            &RpcError::Parse(serde_json::from_str::<Value>("x").unwrap_err()),
        );
        assert_eq!(parse_failure.error().unwrap().code, PARSE_ERROR);
    }
}
