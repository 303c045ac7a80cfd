//! Model Context Protocol (MCP) client over a child-process transport.

pub mod client;
pub mod transport;

pub use client::{McpClient, McpConnectionState};
pub use transport::{McpTransport, StdioTransport};
