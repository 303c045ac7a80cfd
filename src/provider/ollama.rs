//! Ollama native chat API provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::BridgeError;
use crate::types::{Message, ToolCallRequest};

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{ChatModel, ChatRequest, ChatResponse};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

pub struct OllamaProvider {
    model: String,
    base_url: String,
}

impl OllamaProvider {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn build_request_body(&self, request: &ChatRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_ollama)
            .collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });

        if let Some(tools) = request.tools.as_ref().filter(|t| !t.is_empty()) {
            body["tools"] = serde_json::json!(tools);
        }

        body
    }
}

#[async_trait]
impl ChatModel for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BridgeError> {
        let body = self.build_request_body(request);
        let url = format!("{}/api/chat", self.base_url);

        debug!(
            model = %self.model,
            messages = request.messages.len(),
            tools = request.tools.as_ref().map_or(0, Vec::len),
            "Ollama chat"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(""))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: OllamaChatResponse = resp.json().await?;
        let tool_calls = data
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCallRequest::new(tc.function.name, tc.function.arguments))
            .collect();

        Ok(ChatResponse {
            text: data.message.content.unwrap_or_default(),
            tool_calls,
        })
    }
}

fn message_to_ollama(msg: &Message) -> serde_json::Value {
    serde_json::json!({
        "role": msg.role.to_string(),
        "content": msg.content,
    })
}

// Ollama API response types (internal)

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OllamaToolCall>>,
}

#[derive(Deserialize)]
struct OllamaToolCall {
    function: OllamaFunction,
}

#[derive(Deserialize)]
struct OllamaFunction {
    name: String,
    #[serde(default)]
    arguments: serde_json::Value,
}
