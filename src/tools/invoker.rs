//! Execute model-requested tool calls against the tool server.

use tracing::debug;

use super::server::ToolServer;
use super::types::ToolSchema;
use super::validation::validate_arguments;
use crate::error::BridgeError;
use crate::types::ToolCallRequest;

/// Dispatches tool calls for one query, checked against that query's catalog.
pub struct ToolInvoker<'a, T: ToolServer + ?Sized> {
    server: &'a T,
    catalog: &'a [ToolSchema],
}

impl<'a, T: ToolServer + ?Sized> ToolInvoker<'a, T> {
    pub fn new(server: &'a T, catalog: &'a [ToolSchema]) -> Self {
        Self { server, catalog }
    }

    /// Run one tool call and return its output flattened to text.
    ///
    /// Every failure comes back as [`BridgeError::ToolExecution`].
    pub async fn invoke(&self, request: &ToolCallRequest) -> Result<String, BridgeError> {
        let schema = self
            .catalog
            .iter()
            .find(|s| s.name() == request.name)
            .ok_or_else(|| BridgeError::tool_execution(&request.name, "unknown tool"))?;

        validate_arguments(&request.arguments, &schema.function.parameters)
            .map_err(|message| BridgeError::tool_execution(&request.name, message))?;

        debug!(tool = %request.name, "dispatching tool call");
        let content = self
            .server
            .call_tool(&request.name, request.arguments.clone())
            .await
            .map_err(|err| match err {
                err @ BridgeError::ToolExecution { .. } => err,
                other => BridgeError::tool_execution(&request.name, other.to_string()),
            })?;

        Ok(content.to_text())
    }
}
