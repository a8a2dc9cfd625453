//! Error types for Tandem.

use thiserror::Error;

/// Primary error type for all Tandem operations.
///
/// Upstream halts (an agent reporting `terminated` or returning no messages)
/// are not errors; they are recovered locally by the step protocol. This type
/// covers the genuinely fatal cases.
#[derive(Error, Debug)]
pub enum TandemError {
    /// An agent implementation failed while producing a response.
    #[error("Agent '{role_name}' failed: {message}")]
    Agent { role_name: String, message: String },

    /// An agent invocation outlived the configured step guard.
    #[error("Timeout after {0}ms")]
    Timeout(u64),

    /// A run returned without completing a single round (round limit < 1).
    #[error("Empty transcript: the round limit permitted no rounds")]
    EmptyTranscript,
}

impl TandemError {
    /// Create an agent failure error.
    pub fn agent(role_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Agent {
            role_name: role_name.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TandemError>;
