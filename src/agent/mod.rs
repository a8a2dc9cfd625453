//! The agent capability consumed by the society.
//!
//! Model-backed agents are collaborator concerns; the orchestration core only
//! requires that something can take one message and produce an
//! [`AgentResponse`], blocking or suspending.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{AgentResponse, ChatMessage, RoleKind};

/// Configuration-time identity for an agent.
///
/// The same capability plays either role; only the seeded system prompt and
/// the role-name pair differ. [`crate::society::SocietyBuilder::build`] hands
/// one of these to each agent factory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role_name: String,
    pub kind: RoleKind,
    pub system_prompt: String,
}

/// A conversational agent able to play either society role.
///
/// Implementations typically hold their own conversation memory, hence the
/// mutable receiver. Both operations accept one message and return a
/// structured response; a response with `terminated` set or no messages is a
/// recoverable halt, not an error.
#[async_trait]
pub trait ChatAgent: Send {
    /// Process one message, blocking until the response is available.
    fn step(&mut self, message: &ChatMessage) -> Result<AgentResponse>;

    /// Process one message, suspending until the response is available.
    async fn astep(&mut self, message: &ChatMessage) -> Result<AgentResponse>;
}
