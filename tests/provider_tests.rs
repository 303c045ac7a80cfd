//! HTTP-level provider tests against a local mock server.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mcp_bridge::error::BridgeError;
use mcp_bridge::provider::ollama::OllamaProvider;
use mcp_bridge::provider::openai::OpenAiCompatibleProvider;
use mcp_bridge::provider::{ChatModel, ChatRequest};
use mcp_bridge::tools::{adapt, ParameterSchema, ToolDescriptor};
use mcp_bridge::types::Message;

fn weather_catalog() -> Vec<mcp_bridge::tools::ToolSchema> {
    adapt(&[ToolDescriptor::new(
        "get_weather",
        "Current weather for a city",
        ParameterSchema::object()
            .string("city", "City name", true)
            .build(),
    )])
}

async fn last_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("recording enabled");
    requests
        .last()
        .expect("at least one request")
        .body_json()
        .expect("JSON body")
}

#[tokio::test]
async fn ollama_parses_tool_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({ "model": "llama3.2", "stream": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.2",
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [
                    { "function": { "name": "get_weather", "arguments": { "city": "Paris" } } }
                ]
            },
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OllamaProvider::new("llama3.2", format!("{}/", server.uri()));
    let response = provider
        .chat(&ChatRequest {
            messages: vec![Message::user("Weather in Paris?")],
            tools: Some(weather_catalog()),
        })
        .await
        .unwrap();

    assert_eq!(response.text, "");
    assert_eq!(response.tool_calls.len(), 1);
    assert_eq!(response.tool_calls[0].name, "get_weather");
    assert_eq!(response.tool_calls[0].arguments.get("city"), Some(&json!("Paris")));

    let body = last_body(&server).await;
    assert_eq!(body["tools"][0]["type"], "function");
    assert_eq!(body["tools"][0]["function"]["name"], "get_weather");
    assert_eq!(
        body["tools"][0]["function"]["parameters"]["additionalProperties"],
        json!(false)
    );
    assert_eq!(body["messages"][0], json!({ "role": "user", "content": "Weather in Paris?" }));
}

#[tokio::test]
async fn ollama_followup_omits_tools() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": { "role": "assistant", "content": "It is sunny." },
            "done": true
        })))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new("llama3.2", server.uri());
    let response = provider
        .chat(&ChatRequest {
            messages: vec![
                Message::user("Weather in Paris?"),
                Message::assistant(""),
                Message::tool_result("get_weather", "sunny"),
            ],
            tools: None,
        })
        .await
        .unwrap();

    assert_eq!(response.text, "It is sunny.");
    assert!(response.tool_calls.is_empty());

    let body = last_body(&server).await;
    assert!(body.get("tools").is_none());
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["messages"][2]["role"], "user");
}

#[tokio::test]
async fn ollama_error_status_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "model 'nope' not found" })),
        )
        .mount(&server)
        .await;

    let provider = OllamaProvider::new("nope", server.uri());
    let err = provider
        .chat(&ChatRequest {
            messages: vec![Message::user("hi")],
            tools: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BridgeError::Api { status: 404, ref message } if message.contains("not found")
    ));
}

#[tokio::test]
async fn ollama_unreachable_host_is_a_network_error() {
    // nothing listens on port 9 locally
    let provider = OllamaProvider::new("llama3.2", "http://127.0.0.1:9");
    let err = provider
        .chat(&ChatRequest {
            messages: vec![Message::user("hi")],
            tools: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::Network(_)));
}

#[tokio::test]
async fn openai_compatible_parses_string_arguments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "get_weather", "arguments": "{\"city\":\"Oslo\"}" }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiCompatibleProvider::new(
        "gpt-4o-mini",
        "sk-test".to_string(),
        format!("{}/v1", server.uri()),
    );
    let response = provider
        .chat(&ChatRequest {
            messages: vec![Message::user("Weather in Oslo?")],
            tools: Some(weather_catalog()),
        })
        .await
        .unwrap();

    assert_eq!(response.text, "");
    assert_eq!(response.tool_calls[0].arguments.get("city"), Some(&json!("Oslo")));
    let body = last_body(&server).await;
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["tools"][0]["function"]["parameters"]["required"], json!(["city"]));
}

#[tokio::test]
async fn openai_compatible_rejects_malformed_arguments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "content": "",
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "get_weather", "arguments": "{city: Oslo" }
                    }]
                }
            }]
        })))
        .mount(&server)
        .await;

    let provider = OpenAiCompatibleProvider::new("local", String::new(), server.uri());
    let err = provider
        .chat(&ChatRequest {
            messages: vec![Message::user("hi")],
            tools: Some(weather_catalog()),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::ModelCall { ref message, .. } if message.contains("get_weather")));
}

#[tokio::test]
async fn openai_compatible_error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let provider = OpenAiCompatibleProvider::new("gpt-4o-mini", "bad".into(), server.uri());
    let err = provider
        .chat(&ChatRequest {
            messages: vec![Message::user("hi")],
            tools: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BridgeError::Api { status: 401, ref message } if message == "Incorrect API key provided"
    ));
}
