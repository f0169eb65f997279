//! # Stdio JSON-RPC Core
//!
//! Shared plumbing for the sandboxed stdio servers. Each server process hosts
//! exactly one [`Capability`] behind a [`Dispatcher`] and talks newline-delimited
//! JSON-RPC over standard input and output.
//!
//! ## Modules
//! - `capability`: traits a capability implements to be dispatchable
//! - `dispatcher`: request routing and error rendering
//! - `errors`: wire error codes and the dispatcher-level error type
//! - `logging`: stderr-only tracing bootstrap
//! - `protocol`: request/response wire types
//! - `transport`: the line-oriented read/dispatch/write loop
//! - `workspace`: workspace-root path confinement

pub mod capability;
pub mod dispatcher;
pub mod errors;
pub mod logging;
pub mod protocol;
pub mod transport;
pub mod workspace;

pub use capability::{Capability, Method, ServerInfo, ToolDescriptor};
pub use dispatcher::Dispatcher;
pub use errors::{CapabilityError, ErrorKind, RpcError, RpcResult};
pub use protocol::{ErrorObject, Outcome, Params, ParamsError, Request, Response};
pub use transport::{serve, serve_stdio};
pub use workspace::{ConfinementError, WorkspaceError, WorkspaceRoot};
