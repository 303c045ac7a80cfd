//! Chat model trait and provider implementations.

pub mod http;

#[cfg(feature = "ollama")]
pub mod ollama;
#[cfg(feature = "openai")]
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{BridgeConfig, ProviderKind};
use crate::error::BridgeError;
use crate::tools::ToolSchema;
use crate::types::{Message, ToolCallRequest};

/// A request sent to a chat model.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    /// Tools the model may call. `None` forces a plain-text answer.
    pub tools: Option<Vec<ToolSchema>>,
}

/// Response from a chat model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatResponse {
    pub text: String,
    pub tool_calls: Vec<ToolCallRequest>,
}

/// Core trait implemented by all chat providers.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Provider name (e.g., "ollama", "openai").
    fn provider_name(&self) -> &str;
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// One non-streaming round trip.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BridgeError>;
}

#[async_trait]
impl<M: ChatModel + ?Sized> ChatModel for Box<M> {
    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
    fn model_id(&self) -> &str {
        (**self).model_id()
    }
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BridgeError> {
        (**self).chat(request).await
    }
}

#[async_trait]
impl<M: ChatModel + ?Sized> ChatModel for Arc<M> {
    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
    fn model_id(&self) -> &str {
        (**self).model_id()
    }
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BridgeError> {
        (**self).chat(request).await
    }
}

/// Create the chat provider selected by the config.
#[allow(unused_variables)]
pub fn create_provider(config: &BridgeConfig) -> Result<Box<dyn ChatModel>, BridgeError> {
    match config.provider {
        #[cfg(feature = "ollama")]
        ProviderKind::Ollama => Ok(Box::new(ollama::OllamaProvider::new(
            config.model.clone(),
            config.base_url(),
        ))),
        #[cfg(feature = "openai")]
        ProviderKind::OpenAi => {
            let api_key = config.api_key.clone().unwrap_or_default();
            if api_key.is_empty() && config.base_url.is_none() {
                return Err(BridgeError::Configuration(
                    "Missing OPENAI_API_KEY for the default OpenAI endpoint".into(),
                ));
            }
            Ok(Box::new(openai::OpenAiCompatibleProvider::new(
                config.model.clone(),
                api_key,
                config.base_url(),
            )))
        }
        #[allow(unreachable_patterns)]
        other => Err(BridgeError::Configuration(format!(
            "Provider '{other}' not enabled via feature flags"
        ))),
    }
}
