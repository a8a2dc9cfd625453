//! Outcome types for steps and runs.

use serde::{Deserialize, Serialize};

use crate::types::{AgentResponse, ChatMessage, ResponseInfo, TokenUsage, ToolCallRecord};

/// Paired responses from one instructor→solver exchange.
///
/// `solver` wraps the solver's augmented message (the next round's input);
/// `instructor` wraps the instructor's augmented message (what the solver was
/// shown). Either side may carry no message when the exchange halted early.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub solver: AgentResponse,
    pub instructor: AgentResponse,
}

impl StepOutcome {
    /// The instructor halted before producing a usable instruction.
    pub(crate) fn instructor_halted(terminated: bool, info: ResponseInfo) -> Self {
        Self {
            solver: AgentResponse::empty(),
            instructor: AgentResponse::empty()
                .with_terminated(terminated)
                .with_info(info),
        }
    }

    /// The solver halted; the un-augmented instruction is passed back so the
    /// round still records what was asked.
    pub(crate) fn solver_halted(
        terminated: bool,
        solver_info: ResponseInfo,
        instructor_msg: ChatMessage,
        instructor_info: ResponseInfo,
    ) -> Self {
        Self {
            solver: AgentResponse::empty()
                .with_terminated(terminated)
                .with_info(solver_info),
            instructor: AgentResponse::of(instructor_msg).with_info(instructor_info),
        }
    }

    /// Both sides produced a message.
    pub(crate) fn completed(
        solver_msg: ChatMessage,
        solver_info: ResponseInfo,
        instructor_msg: ChatMessage,
        instructor_info: ResponseInfo,
    ) -> Self {
        Self {
            solver: AgentResponse::of(solver_msg).with_info(solver_info),
            instructor: AgentResponse::of(instructor_msg).with_info(instructor_info),
        }
    }
}

/// One committed round of the exchange.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TranscriptEntry {
    pub instructor: String,
    pub solver: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRecord>,
}

/// A completed run: the final answer, the full transcript, and the
/// accumulated token usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocietyRun {
    pub answer: String,
    pub transcript: Vec<TranscriptEntry>,
    pub usage: TokenUsage,
}
