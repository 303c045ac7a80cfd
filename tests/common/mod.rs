//! Shared test doubles: a scripted chat model and an in-memory tool server.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use mcp_bridge::error::BridgeError;
use mcp_bridge::provider::{ChatModel, ChatRequest, ChatResponse};
use mcp_bridge::tools::{ParameterSchema, ToolContent, ToolDescriptor, ToolServer};
use mcp_bridge::types::ToolCallRequest;

/// A chat model that replays queued responses and records every request.
pub struct ScriptedModel {
    model_id: String,
    responses: Mutex<VecDeque<Result<ChatResponse, BridgeError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a plain-text response.
    pub fn queue_text(&self, text: &str) -> &Self {
        self.queue(Ok(ChatResponse {
            text: text.to_string(),
            tool_calls: Vec::new(),
        }))
    }

    /// Queue a response requesting the given tool calls.
    pub fn queue_tool_calls(&self, text: &str, calls: Vec<(&str, Value)>) -> &Self {
        self.queue(Ok(ChatResponse {
            text: text.to_string(),
            tool_calls: calls
                .into_iter()
                .map(|(name, args)| ToolCallRequest::new(name, args))
                .collect(),
        }))
    }

    pub fn queue_error(&self, error: BridgeError) -> &Self {
        self.queue(Err(error))
    }

    fn queue(&self, response: Result<ChatResponse, BridgeError>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BridgeError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BridgeError::model_call("scripted model ran out of responses")))
    }
}

/// A deterministic model: same request, same response, no queue.
pub struct FixedModel<F>(pub F);

#[async_trait]
impl<F> ChatModel for FixedModel<F>
where
    F: Fn(&ChatRequest) -> ChatResponse + Send + Sync,
{
    fn provider_name(&self) -> &str {
        "fixed"
    }

    fn model_id(&self) -> &str {
        "fixed"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BridgeError> {
        Ok((self.0)(request))
    }
}

/// In-memory tool server with per-tool canned results or failures.
#[derive(Default)]
pub struct MockToolServer {
    tools: Vec<ToolDescriptor>,
    results: HashMap<String, Result<ToolContent, String>>,
    catalog_error: Option<String>,
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl MockToolServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool that returns `result`.
    pub fn with_tool(mut self, descriptor: ToolDescriptor, result: ToolContent) -> Self {
        self.results.insert(descriptor.name.clone(), Ok(result));
        self.tools.push(descriptor);
        self
    }

    /// Register a tool whose every call fails with `message`.
    pub fn with_failing_tool(mut self, descriptor: ToolDescriptor, message: &str) -> Self {
        self.results
            .insert(descriptor.name.clone(), Err(message.to_string()));
        self.tools.push(descriptor);
        self
    }

    pub fn with_catalog_error(mut self, message: &str) -> Self {
        self.catalog_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }
}

#[async_trait]
impl ToolServer for MockToolServer {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, BridgeError> {
        match &self.catalog_error {
            Some(message) => Err(BridgeError::Mcp(message.clone())),
            None => Ok(self.tools.clone()),
        }
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<ToolContent, BridgeError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), arguments));
        match self.results.get(name) {
            Some(Ok(content)) => Ok(content.clone()),
            Some(Err(message)) => Err(BridgeError::tool_execution(name, message.clone())),
            None => Err(BridgeError::tool_execution(name, "no such tool")),
        }
    }
}

/// `calculator(op, a, b)`.
pub fn calculator() -> ToolDescriptor {
    ToolDescriptor::new(
        "calculator",
        "Basic arithmetic",
        ParameterSchema::object()
            .string_enum("op", "Operation", &["add", "sub", "mul", "div"], true)
            .number("a", "Left operand", true)
            .number("b", "Right operand", true)
            .build(),
    )
}

/// A tool with a single optional string parameter.
pub fn simple_tool(name: &str) -> ToolDescriptor {
    ToolDescriptor::new(
        name,
        format!("The {name} tool"),
        ParameterSchema::object()
            .string("input", "Free text", false)
            .build(),
    )
}
