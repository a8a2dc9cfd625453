//! Agent invocation results.

use serde::{Deserialize, Serialize};

use super::message::{ChatMessage, ToolCallRecord};
use super::usage::TokenUsage;

/// Result of one agent invocation.
///
/// The step protocol guarantees at most one message per response; responses
/// carrying more are reduced to the first candidate in original order. A
/// response with `terminated` set or no messages must not be dereferenced for
/// a "first message" — use [`AgentResponse::reduce`] or
/// [`AgentResponse::content`], which tolerate both.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentResponse {
    pub messages: Vec<ChatMessage>,
    pub terminated: bool,
    #[serde(default)]
    pub info: ResponseInfo,
}

impl AgentResponse {
    /// Response carrying no messages, no termination, no metadata.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Response wrapping a single message.
    pub fn of(message: ChatMessage) -> Self {
        Self {
            messages: vec![message],
            terminated: false,
            info: ResponseInfo::default(),
        }
    }

    /// Set the termination flag (builder pattern).
    pub fn with_terminated(mut self, terminated: bool) -> Self {
        self.terminated = terminated;
        self
    }

    /// Attach response metadata (builder pattern).
    pub fn with_info(mut self, info: ResponseInfo) -> Self {
        self.info = info;
        self
    }

    /// First-candidate view of the response's message, if any.
    pub fn reduce(&self) -> Option<&ChatMessage> {
        self.messages.first()
    }

    /// Text of the first message, or the empty string when there is none.
    pub fn content(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

/// Metadata reported alongside an agent response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResponseInfo {
    /// Token usage of the underlying model call, when the agent reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Tool invocations performed while producing the response, in call order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRecord>,
}

impl ResponseInfo {
    /// Metadata carrying only usage numbers.
    pub fn with_usage(usage: TokenUsage) -> Self {
        Self {
            usage: Some(usage),
            tool_calls: Vec::new(),
        }
    }
}
