//! Command-line interface for the bridge binary.

pub mod repl;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{read_env_file, BridgeConfig, ProviderKind};
use crate::error::BridgeError;

pub use repl::{run_repl, LineSource, ReadlineSource, ScriptedLines};

/// Chat with a local model that can call tools from an MCP server.
#[derive(Parser, Debug)]
#[command(name = "mcp-bridge", version, about = "Bridge a chat model to an MCP tool server")]
pub struct Cli {
    /// Path to the MCP server script (.py runs under python3, anything else under node)
    pub server_script: PathBuf,

    /// Model to use (e.g. llama3.2)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Chat provider (ollama, openai)
    #[arg(long)]
    pub provider: Option<ProviderKind>,

    /// Override the provider endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// Read settings from this env file instead of ./.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Resolve settings: flags, then the process environment, then the env
    /// file (`--env-file` or `./.env`), then defaults.
    pub fn resolve_config(&self) -> Result<BridgeConfig, BridgeError> {
        let file_vars = match &self.env_file {
            Some(path) => read_env_file(path)?,
            None => {
                let _ = dotenvy::dotenv(); // load .env if present, ignore error
                HashMap::new()
            }
        };
        // The provider decides which endpoint variables are read.
        let provider = self.provider.map(|p| p.to_string());
        let config = BridgeConfig::from_vars(|key| {
            if key == "MCP_BRIDGE_PROVIDER" && provider.is_some() {
                return provider.clone();
            }
            std::env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        })?;
        Ok(self.apply_to(config))
    }

    /// Layer flags over already resolved settings.
    pub fn apply_to(&self, mut config: BridgeConfig) -> BridgeConfig {
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(url) = &self.base_url {
            config.base_url = Some(url.clone());
        }
        config
    }

    /// Default log filter for this invocation.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "mcp_bridge=debug,warn"
        } else {
            "warn"
        }
    }
}
