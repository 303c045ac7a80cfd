//! mcp-bridge: answer questions with a chat model that can call tools
//! served by a Model Context Protocol server.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use mcp_bridge::config::BridgeConfig;
//! use mcp_bridge::mcp::{McpClient, StdioTransport};
//! use mcp_bridge::orchestrator::Orchestrator;
//! use mcp_bridge::provider::create_provider;
//!
//! # async fn example() -> mcp_bridge::error::Result<()> {
//! let config = BridgeConfig::from_env()?;
//! let model = create_provider(&config)?;
//! let client = McpClient::connect(StdioTransport::for_script(Path::new("server.py"))).await?;
//! let orchestrator = Orchestrator::new(model, client);
//! println!("{}", orchestrator.answer("What is 2+2?").await?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod orchestrator;
pub mod provider;
pub mod tools;
pub mod types;
