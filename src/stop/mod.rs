//! Termination sentinels for society runs.

use serde::{Deserialize, Serialize};

/// The literal token an instructor emits once the overall task is complete.
pub const TASK_DONE: &str = "TASK_DONE";

/// Localized completion synonym accepted alongside [`TASK_DONE`].
pub const TASK_DONE_LOCALIZED: &str = "任务已完成";

/// Literal tokens whose presence in message content marks the exchange as
/// finished.
///
/// The step protocol and both drivers consult the same set, so the
/// synchronous and asynchronous forms cannot diverge on what counts as
/// completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentinelSet {
    patterns: Vec<String>,
}

impl Default for SentinelSet {
    fn default() -> Self {
        Self::new([TASK_DONE, TASK_DONE_LOCALIZED])
    }
}

impl SentinelSet {
    /// Build a set from literal patterns.
    pub fn new(patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// A set recognizing exactly one pattern.
    pub fn single(pattern: impl Into<String>) -> Self {
        Self::new([pattern.into()])
    }

    /// Add a pattern (builder pattern).
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// The configured patterns, in match order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether any sentinel occurs in `text` (substring containment).
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }
}
