//! Error types for the bridge.

use thiserror::Error;

/// Primary error type for all bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to fetch tool catalog: {0}")]
    CatalogFetch(String),

    #[error("Model call failed: {message}")]
    ModelCall {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("MCP error: {0}")]
    Mcp(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Broad error category used to decide how far a failure propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Model,
    ToolExecution,
    Network,
    Configuration,
    Serialization,
    Unknown,
}

impl BridgeError {
    /// Create a model-call error without an underlying source.
    pub fn model_call(message: impl Into<String>) -> Self {
        Self::ModelCall {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap any error raised during a chat round trip.
    pub fn from_model_failure(error: BridgeError) -> Self {
        match error {
            err @ Self::ModelCall { .. } => err,
            other => Self::ModelCall {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }

    /// Create a tool execution error.
    pub fn tool_execution(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CatalogFetch(_) => ErrorCategory::Catalog,
            Self::ModelCall { .. } | Self::Api { .. } => ErrorCategory::Model,
            Self::ToolExecution { .. } => ErrorCategory::ToolExecution,
            Self::Network(_) | Self::Io(_) | Self::Mcp(_) => ErrorCategory::Network,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::InvalidState(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether the orchestrator absorbs this error instead of aborting the query.
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::ToolExecution
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BridgeError>;
