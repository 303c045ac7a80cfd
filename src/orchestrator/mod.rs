//! Single-query orchestration: one tool-augmented answer per call.
//!
//! A query runs through at most two chat round trips:
//!
//! 1. The user message plus the freshly fetched tool catalog.
//! 2. If the model asked for tools: the conversation extended with each
//!    successful tool result, sent without tools so the model must answer
//!    in plain text.
//!
//! Tool calls are dispatched one at a time in the order the model emitted
//! them. A failing tool is logged and skipped; catalog and model failures
//! abort the query.

use strum::Display;
use tracing::{debug, info, warn};

use crate::error::BridgeError;
use crate::provider::{ChatModel, ChatRequest, ChatResponse};
use crate::tools::{adapt, ToolInvoker, ToolSchema, ToolServer};
use crate::types::{Conversation, Message};

/// Separator between answer fragments.
pub const FRAGMENT_SEPARATOR: &str = "\n";

/// Where a query is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TurnState {
    Start,
    AwaitingFirstModelResponse,
    DispatchingTools,
    AwaitingFollowupModelResponse,
    Done,
}

/// Outcome of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub answer: String,
    /// The full message history the query built.
    pub conversation: Conversation,
    /// Number of chat round trips performed (1 or 2).
    pub round_trips: usize,
    /// Tool calls that failed and were skipped.
    pub skipped_tools: Vec<String>,
}

/// Drives the chat model and the tool server for one query at a time.
pub struct Orchestrator<M, T> {
    model: M,
    tools: T,
}

impl<M: ChatModel, T: ToolServer> Orchestrator<M, T> {
    pub fn new(model: M, tools: T) -> Self {
        Self { model, tools }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn tool_server(&self) -> &T {
        &self.tools
    }

    /// Release the collaborators, e.g. to close the tool server connection.
    pub fn into_parts(self) -> (M, T) {
        (self.model, self.tools)
    }

    /// Answer `query`, returning the answer fragments joined by newlines.
    pub async fn answer(&self, query: &str) -> Result<String, BridgeError> {
        self.run(query).await.map(|turn| turn.answer)
    }

    /// Answer `query` and keep the conversation it produced.
    pub async fn run(&self, query: &str) -> Result<Turn, BridgeError> {
        let mut state = TurnState::Start;
        let mut conversation = Conversation::seeded(query);
        let mut fragments: Vec<String> = Vec::new();
        let mut skipped_tools = Vec::new();

        transition(&mut state, TurnState::AwaitingFirstModelResponse);
        let catalog = self.fetch_catalog().await?;
        let first = self
            .round_trip(&conversation, Some(catalog.clone()))
            .await?;
        let mut round_trips = 1;

        if !first.text.is_empty() {
            fragments.push(first.text.clone());
        }

        if first.tool_calls.is_empty() {
            transition(&mut state, TurnState::Done);
            return Ok(Turn {
                answer: fragments.join(FRAGMENT_SEPARATOR),
                conversation,
                round_trips,
                skipped_tools,
            });
        }

        transition(&mut state, TurnState::DispatchingTools);
        let invoker = ToolInvoker::new(&self.tools, &catalog);
        for request in &first.tool_calls {
            match invoker.invoke(request).await {
                Ok(text) => {
                    conversation.push(Message::assistant(first.text.clone()));
                    conversation.push(Message::tool_result(&request.name, text));
                }
                Err(err) => {
                    warn!(tool = %request.name, error = %err, "tool call failed, skipping its result");
                    skipped_tools.push(request.name.clone());
                }
            }
        }

        transition(&mut state, TurnState::AwaitingFollowupModelResponse);
        let followup = self.round_trip(&conversation, None).await?;
        round_trips += 1;
        if !followup.text.is_empty() {
            fragments.push(followup.text);
        }

        transition(&mut state, TurnState::Done);
        info!(
            tool_calls = first.tool_calls.len(),
            skipped = skipped_tools.len(),
            "query answered"
        );

        Ok(Turn {
            answer: fragments.join(FRAGMENT_SEPARATOR),
            conversation,
            round_trips,
            skipped_tools,
        })
    }

    async fn fetch_catalog(&self) -> Result<Vec<ToolSchema>, BridgeError> {
        let descriptors = self.tools.list_tools().await.map_err(|err| match err {
            err @ BridgeError::CatalogFetch(_) => err,
            other => BridgeError::CatalogFetch(other.to_string()),
        })?;
        debug!(tools = descriptors.len(), "fetched tool catalog");
        Ok(adapt(&descriptors))
    }

    async fn round_trip(
        &self,
        conversation: &Conversation,
        tools: Option<Vec<ToolSchema>>,
    ) -> Result<ChatResponse, BridgeError> {
        let request = ChatRequest {
            messages: conversation.messages().to_vec(),
            tools,
        };
        let response = self
            .model
            .chat(&request)
            .await
            .map_err(BridgeError::from_model_failure)?;
        debug!(
            model = %self.model.model_id(),
            tool_calls = response.tool_calls.len(),
            "model responded"
        );
        Ok(response)
    }
}

fn transition(state: &mut TurnState, next: TurnState) {
    debug!(from = %state, to = %next, "turn state");
    *state = next;
}
