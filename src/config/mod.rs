//! Configuration system (layered: CLI flags > environment > `.env` file > defaults).

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use strum::{Display, EnumString};

use crate::error::BridgeError;

pub const DEFAULT_MODEL: &str = "llama3.2";

/// Which chat API the bridge talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    #[default]
    Ollama,
    #[strum(serialize = "openai")]
    OpenAi,
}

/// Resolved settings for one bridge process.
#[derive(Clone, PartialEq)]
pub struct BridgeConfig {
    pub provider: ProviderKind,
    pub model: String,
    /// Explicit endpoint; `None` means the provider's default.
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            api_key: None,
        }
    }
}

impl BridgeConfig {
    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, BridgeError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Resolve settings through a variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, BridgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = non_empty("MCP_BRIDGE_PROVIDER") {
            config.provider = raw.trim().parse().map_err(|_| {
                BridgeError::Configuration(format!(
                    "Unknown provider '{raw}' in MCP_BRIDGE_PROVIDER (expected ollama or openai)"
                ))
            })?;
        }
        if let Some(model) = non_empty("MCP_BRIDGE_MODEL") {
            config.model = model;
        }

        config.base_url = match config.provider {
            ProviderKind::Ollama => non_empty("OLLAMA_BASE_URL")
                .or_else(|| non_empty("OLLAMA_HOST"))
                .map(normalize_host),
            ProviderKind::OpenAi => non_empty("OPENAI_BASE_URL"),
        };
        if config.provider == ProviderKind::OpenAi {
            config.api_key = non_empty("OPENAI_API_KEY");
        }

        Ok(config)
    }

    /// The endpoint to use, falling back to the provider default.
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.clone();
        }
        match self.provider {
            ProviderKind::Ollama => "http://127.0.0.1:11434".to_string(),
            ProviderKind::OpenAi => "https://api.openai.com/v1".to_string(),
        }
    }
}

/// Read `KEY=VALUE` pairs from an env file without touching the process environment.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, BridgeError> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| {
        BridgeError::Configuration(format!("cannot read env file {}: {e}", path.display()))
    })?;
    iter.map(|item| {
        item.map_err(|e| {
            BridgeError::Configuration(format!("invalid line in {}: {e}", path.display()))
        })
    })
    .collect()
}

/// `OLLAMA_HOST` is commonly given without a scheme (`0.0.0.0:11434`).
fn normalize_host(raw: String) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw
    } else {
        format!("http://{raw}")
    }
}
