use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde_json::{Value, json};

use crate::{
    capability::{Capability, Method, ToolDescriptor},
    errors::{ErrorKind, RpcError},
    protocol::{Params, Request, Response},
};

/// Routes parsed requests to a single capability and renders the outcome
///
/// Every input produces exactly one [`Response`]; nothing a caller sends can
/// make the dispatcher return without one.
pub struct Dispatcher<C> {
    capability: C,
}

impl<C: Capability> Dispatcher<C> {
    pub fn new(capability: C) -> Self {
        Self { capability }
    }

    /// Unsolicited message emitted before any input is read
    pub fn announcement(&self) -> Response {
        let tools: Vec<ToolDescriptor> = C::Method::ALL
            .iter()
            .copied()
            .map(ToolDescriptor::of)
            .collect();

        Response::success(
            Value::Null,
            json!({
                "server": self.capability.server_info(),
                "tools": tools,
            }),
        )
    }

    /// Handle one raw input line (without its trailing newline)
    pub async fn handle_line(&self, line: &[u8]) -> Response {
        match Request::parse(line) {
            Ok(request) => self.handle(request).await,
            Err(err) => {
                tracing::warn!(error = %err, "discarding malformed input line");
                Response::failure(Value::Null, &err)
            }
        }
    }

    pub async fn handle(&self, request: Request) -> Response {
        let Request { id, method, params } = request;
        let method_name = method.unwrap_or_default();

        let Some(method) = C::Method::from_name(&method_name) else {
            tracing::warn!(method = %method_name, %id, "rejecting unknown method");
            return Response::failure(id, &RpcError::UnknownMethod(method_name));
        };

        tracing::debug!(method = method.name(), %id, "dispatching request");

        let call = self.capability.call(method, Params::new(params));
        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(result)) => Response::success(id, result),
            Ok(Err(err)) => {
                let err = RpcError::from_capability(&err);
                log_failure(method.name(), &err);
                Response::failure(id, &err)
            }
            Err(_) => {
                let err = RpcError::HandlerPanicked {
                    method: method.name(),
                };
                tracing::error!(method = method.name(), "handler panicked");
                Response::failure(id, &err)
            }
        }
    }
}

fn log_failure(method: &str, err: &RpcError) {
    match err {
        RpcError::Capability {
            kind: ErrorKind::Validation,
            message,
        } => tracing::warn!(method, %message, "request rejected by validation"),
        RpcError::Capability {
            kind: ErrorKind::Timeout,
            message,
        } => tracing::warn!(method, %message, "request timed out"),
        other => tracing::error!(method, error = %other, "request failed"),
    }
}
