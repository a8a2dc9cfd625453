//! Message types exchanged between the society's roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which side of the society produced a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoleKind {
    Instructor,
    Solver,
}

/// A message in an instructor/solver exchange.
///
/// Content is immutable by convention once handed to an agent: augmentation
/// always operates on an explicit clone, never in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role_name: String,
    pub role: RoleKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_responses: Option<Vec<ToolResponseRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    /// Create a message for the given role.
    pub fn new(role: RoleKind, role_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
            role,
            content: content.into(),
            tool_calls: None,
            tool_responses: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Create an instructor message.
    pub fn instructor(role_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(RoleKind::Instructor, role_name, content)
    }

    /// Create a solver message.
    pub fn solver(role_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(RoleKind::Solver, role_name, content)
    }

    /// Attach tool-call records (builder pattern).
    pub fn with_tool_calls(mut self, calls: Vec<ToolCallRecord>) -> Self {
        self.tool_calls = Some(calls);
        self
    }
}

/// The plain-record form of one tool invocation made by an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallRecord {
    pub tool_call_id: String,
    pub tool_name: String,
    pub args: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

/// A tool execution outcome reported back to the calling agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResponseRecord {
    pub tool_call_id: String,
    pub content: serde_json::Value,
    #[serde(default)]
    pub is_error: bool,
}
