//! MCP client for connecting to MCP servers.

use async_trait::async_trait;
use rmcp::{
    model::{CallToolRequestParams, CallToolResult, ClientInfo, JsonObject, ProtocolVersion},
    service::{ClientInitializeError, ServiceError},
};
use tracing::{debug, info};

use crate::error::BridgeError;
use crate::tools::{ToolContent, ToolDescriptor, ToolServer};

use super::transport::{McpRunningService, McpTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpConnectionState {
    Connected,
    Closed,
}

/// Client for a Model Context Protocol server.
pub struct McpClient {
    session: Option<McpRunningService>,
    state: McpConnectionState,
}

impl McpClient {
    /// Connect through `transport` and complete the initialize handshake.
    pub async fn connect<T: McpTransport>(mut transport: T) -> Result<Self, BridgeError> {
        let client_info = ClientInfo {
            protocol_version: ProtocolVersion::LATEST,
            ..Default::default()
        };
        let session = transport.connect(client_info).await?;
        info!("connected to MCP server");
        Ok(Self::from_running_service(session))
    }

    /// Wrap an already-initialized rmcp service.
    pub fn from_running_service(session: McpRunningService) -> Self {
        Self {
            session: Some(session),
            state: McpConnectionState::Connected,
        }
    }

    pub fn connection_state(&self) -> McpConnectionState {
        self.state
    }

    /// Names of the tools the server currently advertises.
    pub async fn tool_names(&self) -> Result<Vec<String>, BridgeError> {
        Ok(self
            .list_tools()
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect())
    }

    /// Shut down the session and the server process. Safe to call twice.
    pub async fn close(&mut self) -> Result<(), BridgeError> {
        self.state = McpConnectionState::Closed;
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let reason = session
            .cancel()
            .await
            .map_err(|e| BridgeError::Mcp(format!("MCP session shutdown failed: {e}")))?;
        debug!(?reason, "MCP session closed");
        Ok(())
    }

    fn session_ref(&self) -> Result<&McpRunningService, BridgeError> {
        match (&self.session, self.state) {
            (Some(session), McpConnectionState::Connected) if !session.is_closed() => Ok(session),
            _ => Err(BridgeError::Mcp("MCP session is closed".into())),
        }
    }
}

#[async_trait]
impl ToolServer for McpClient {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, BridgeError> {
        let session = self.session_ref()?;

        let tools = match session.list_all_tools().await {
            Ok(tools) => tools,
            Err(ServiceError::UnexpectedResponse) => {
                let page = session
                    .list_tools(None)
                    .await
                    .map_err(|e| map_service_error("list_tools", e))?;
                page.tools
            }
            Err(e) => return Err(map_service_error("list_tools", e)),
        };

        Ok(tools.into_iter().map(map_mcp_tool).collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> Result<ToolContent, BridgeError> {
        let session = self
            .session_ref()
            .map_err(|e| BridgeError::tool_execution(name, e.to_string()))?;
        let arguments: Option<JsonObject> = Some(arguments);

        let result = session
            .call_tool(CallToolRequestParams {
                meta: None,
                name: name.to_owned().into(),
                arguments,
                task: None,
            })
            .await
            .map_err(|e| BridgeError::tool_execution(name, map_service_error("call_tool", e).to_string()))?;

        map_call_result(name, result)
    }
}

fn map_mcp_tool(tool: rmcp::model::Tool) -> ToolDescriptor {
    let input_schema = serde_json::Value::Object((*tool.input_schema).clone());
    ToolDescriptor::from_input_schema(
        tool.name.to_string(),
        tool.description.map(|d| d.to_string()).unwrap_or_default(),
        &input_schema,
    )
}

fn map_call_result(name: &str, result: CallToolResult) -> Result<ToolContent, BridgeError> {
    if result.is_error.unwrap_or(false) {
        let message = result
            .content
            .iter()
            .filter_map(|item| item.as_text().map(|t| t.text.clone()))
            .collect::<Vec<_>>()
            .join("\n");
        let message = if message.is_empty() {
            result
                .structured_content
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "MCP tool returned an error result".into())
        } else {
            message
        };
        return Err(BridgeError::tool_execution(name, message));
    }

    let items = result
        .content
        .iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .collect();
    Ok(ToolContent::Items(items))
}

pub(crate) fn map_client_initialize_error(error: ClientInitializeError) -> BridgeError {
    match error {
        ClientInitializeError::ConnectionClosed(context) => {
            BridgeError::Mcp(format!("MCP initialize connection closed: {context}"))
        }
        ClientInitializeError::TransportError { error, context } => {
            BridgeError::Mcp(format!("MCP initialize transport error ({context}): {error}"))
        }
        ClientInitializeError::JsonRpcError(error) => BridgeError::Mcp(format!(
            "MCP initialize JSON-RPC error {}: {}",
            error.code.0, error.message
        )),
        ClientInitializeError::Cancelled => BridgeError::Mcp("MCP initialize cancelled".into()),
        other => BridgeError::Mcp(format!("MCP initialize error: {other}")),
    }
}

fn map_service_error(context: &str, error: ServiceError) -> BridgeError {
    match error {
        ServiceError::McpError(error) => BridgeError::Mcp(format!(
            "{context}: MCP error {}: {}",
            error.code.0, error.message
        )),
        ServiceError::TransportSend(error) => {
            BridgeError::Mcp(format!("{context}: MCP transport send failed: {error}"))
        }
        ServiceError::TransportClosed => BridgeError::Mcp(format!("{context}: MCP transport closed")),
        ServiceError::UnexpectedResponse => {
            BridgeError::Mcp(format!("{context}: unexpected MCP response"))
        }
        ServiceError::Cancelled { reason } => {
            let suffix = reason
                .as_deref()
                .map(|r| format!(" ({r})"))
                .unwrap_or_default();
            BridgeError::Mcp(format!("{context}: MCP request cancelled{suffix}"))
        }
        ServiceError::Timeout { timeout } => BridgeError::Mcp(format!(
            "{context}: MCP request timed out after {}ms",
            timeout.as_millis()
        )),
        other => BridgeError::Mcp(format!("{context}: MCP service error: {other}")),
    }
}
