//! MCP transport layer.

use std::path::Path;

use async_trait::async_trait;
use rmcp::model::ClientInfo;
use rmcp::service::{DynService, RoleClient, RunningService, ServiceExt};
use rmcp::transport::TokioChildProcess;
use tokio::process::Command;
use tracing::debug;

use crate::error::BridgeError;

pub type DynClientService = Box<dyn DynService<RoleClient>>;
pub type McpRunningService = RunningService<RoleClient, DynClientService>;

/// Transport trait for establishing an MCP session.
#[async_trait]
pub trait McpTransport: Send {
    /// Open the connection and complete the MCP initialize handshake.
    async fn connect(&mut self, client_info: ClientInfo) -> Result<McpRunningService, BridgeError>;
}

/// Stdio-based MCP transport: the server runs as a child process.
#[derive(Debug, Clone)]
pub struct StdioTransport {
    command: String,
    args: Vec<String>,
}

impl StdioTransport {
    /// Create a stdio transport from command and args.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Run a server script: `python3` for `.py` files, `node` for anything else.
    pub fn for_script(path: &Path) -> Self {
        let interpreter = match path.extension().and_then(|e| e.to_str()) {
            Some("py") => "python3",
            _ => "node",
        };
        Self::new(interpreter, vec![path.to_string_lossy().into_owned()])
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl McpTransport for StdioTransport {
    async fn connect(&mut self, client_info: ClientInfo) -> Result<McpRunningService, BridgeError> {
        debug!(command = %self.command, args = ?self.args, "spawning MCP server");

        let mut command = Command::new(&self.command);
        command.args(&self.args);
        let transport = TokioChildProcess::new(command)?;

        client_info
            .into_dyn()
            .serve(transport)
            .await
            .map_err(super::client::map_client_initialize_error)
    }
}
