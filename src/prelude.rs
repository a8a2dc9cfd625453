//! Convenience re-exports for common use.

pub use crate::agent::{ChatAgent, RoleAssignment};
pub use crate::error::{Result, TandemError};
pub use crate::society::{
    arun_society, run_society, AnswerFormat, DriverConfig, RunId, Society, SocietyBuilder,
    SocietyPrompts, SocietyRun, StepOutcome, TranscriptEntry,
};
pub use crate::stop::{SentinelSet, TASK_DONE};
pub use crate::types::{
    AgentResponse, ChatMessage, ResponseInfo, RoleKind, TokenUsage, ToolCallRecord,
    ToolResponseRecord,
};
