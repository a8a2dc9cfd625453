//! Token usage accounting.

use serde::{Deserialize, Serialize};

/// Token counts accumulated across agent invocations.
///
/// Counters only grow during a run; the driver never resets them mid-run.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub completion_tokens: u64,
    pub prompt_tokens: u64,
}

impl TokenUsage {
    pub fn new(completion_tokens: u64, prompt_tokens: u64) -> Self {
        Self {
            completion_tokens,
            prompt_tokens,
        }
    }

    /// Merge another usage into this one (accumulate).
    pub fn merge(&mut self, other: &TokenUsage) {
        self.completion_tokens += other.completion_tokens;
        self.prompt_tokens += other.prompt_tokens;
    }
}
