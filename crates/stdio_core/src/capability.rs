use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::{errors::CapabilityError, protocol::Params};

/// Closed set of methods a capability answers to
///
/// Implementors are fieldless enums; `name` must be an exhaustive match so a new
/// variant cannot be added without a wire name.
pub trait Method: Copy + std::fmt::Debug + Send + Sync + 'static {
    /// Every method, in announcement order
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn description(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|method| method.name() == name)
    }
}

/// Identity reported in the startup announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// One entry of the announced tool list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
}

impl ToolDescriptor {
    pub fn of<M: Method>(method: M) -> Self {
        Self {
            name: method.name(),
            description: method.description(),
        }
    }
}

/// An operation domain hosted by one server process
#[async_trait]
pub trait Capability: Send + Sync {
    type Method: Method;
    type Error: CapabilityError;

    fn server_info(&self) -> ServerInfo;

    /// Validate and perform one method call
    async fn call(&self, method: Self::Method, params: Params) -> Result<Value, Self::Error>;
}
