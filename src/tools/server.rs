//! Tool server seam: runtime-discovered tools executed remotely (e.g., MCP).

use std::sync::Arc;

use async_trait::async_trait;

use super::types::{ToolContent, ToolDescriptor};
use crate::error::BridgeError;

/// A server that advertises tools and executes them by name.
#[async_trait]
pub trait ToolServer: Send + Sync {
    /// List the tools currently advertised.
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, BridgeError>;

    /// Execute a tool by name.
    async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolContent, BridgeError>;
}

#[async_trait]
impl<T: ToolServer + ?Sized> ToolServer for Arc<T> {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, BridgeError> {
        (**self).list_tools().await
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolContent, BridgeError> {
        (**self).call_tool(name, arguments).await
    }
}
