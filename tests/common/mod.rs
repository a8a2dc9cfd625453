//! Shared test helpers: scripted stub agents.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tandem::prelude::*;

/// Log of every message an agent was shown, shared with the test body.
pub type SeenLog = Arc<Mutex<Vec<ChatMessage>>>;

pub fn seen_log() -> SeenLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Replays a fixed queue of responses and records every message it was shown.
/// Once the script runs dry it reports a terminated empty response.
pub struct ScriptedAgent {
    script: VecDeque<AgentResponse>,
    seen: SeenLog,
}

impl ScriptedAgent {
    /// Agent replaying full responses.
    pub fn new(script: Vec<AgentResponse>, seen: &SeenLog) -> Box<dyn ChatAgent> {
        Box::new(Self {
            script: script.into(),
            seen: Arc::clone(seen),
        })
    }

    /// Agent replaying plain text replies under its assigned role.
    pub fn from_texts(role: &RoleAssignment, texts: &[&str], seen: &SeenLog) -> Box<dyn ChatAgent> {
        let script = texts
            .iter()
            .map(|text| AgentResponse::of(ChatMessage::new(role.kind, &role.role_name, *text)))
            .collect();
        Box::new(Self {
            script,
            seen: Arc::clone(seen),
        })
    }

    fn next_response(&mut self, message: &ChatMessage) -> Result<AgentResponse> {
        self.seen.lock().unwrap().push(message.clone());
        Ok(self
            .script
            .pop_front()
            .unwrap_or_else(|| AgentResponse::empty().with_terminated(true)))
    }
}

#[async_trait]
impl ChatAgent for ScriptedAgent {
    fn step(&mut self, message: &ChatMessage) -> Result<AgentResponse> {
        self.next_response(message)
    }

    async fn astep(&mut self, message: &ChatMessage) -> Result<AgentResponse> {
        self.next_response(message)
    }
}

/// Agent whose suspending step sleeps before replying; the blocking step
/// replies immediately.
pub struct SlowAgent {
    role: RoleAssignment,
    delay: Duration,
}

impl SlowAgent {
    pub fn new(role: RoleAssignment, delay: Duration) -> Box<dyn ChatAgent> {
        Box::new(Self { role, delay })
    }
}

#[async_trait]
impl ChatAgent for SlowAgent {
    fn step(&mut self, _message: &ChatMessage) -> Result<AgentResponse> {
        Ok(AgentResponse::of(ChatMessage::new(
            self.role.kind,
            &self.role.role_name,
            "Instruction: wait",
        )))
    }

    async fn astep(&mut self, message: &ChatMessage) -> Result<AgentResponse> {
        tokio::time::sleep(self.delay).await;
        self.step(message)
    }
}

/// Agent whose every invocation fails.
pub struct FailingAgent {
    role: RoleAssignment,
}

impl FailingAgent {
    pub fn new(role: RoleAssignment) -> Box<dyn ChatAgent> {
        Box::new(Self { role })
    }
}

#[async_trait]
impl ChatAgent for FailingAgent {
    fn step(&mut self, _message: &ChatMessage) -> Result<AgentResponse> {
        Err(TandemError::agent(
            &self.role.role_name,
            "model backend unavailable",
        ))
    }

    async fn astep(&mut self, message: &ChatMessage) -> Result<AgentResponse> {
        self.step(message)
    }
}

/// A single-message response carrying usage numbers.
pub fn reply_with_usage(
    role: RoleKind,
    role_name: &str,
    text: &str,
    completion: u64,
    prompt: u64,
) -> AgentResponse {
    AgentResponse::of(ChatMessage::new(role, role_name, text))
        .with_info(ResponseInfo::with_usage(TokenUsage::new(completion, prompt)))
}
