//! The society session: two agents bound to one task, and the per-round step
//! protocol.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::agent::{ChatAgent, RoleAssignment};
use crate::error::Result;
use crate::stop::SentinelSet;
use crate::types::{AgentResponse, ChatMessage, RoleKind, ToolResponseRecord};

use super::prompts::{self, SocietyPrompts};
use super::types::StepOutcome;

/// Answer-format policy applied when the instructor signals completion.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnswerFormat {
    /// The final answer is free text.
    #[default]
    FreeForm,
    /// The final answer must carry tagged analysis and final-answer sections
    /// with machine-checkable value formatting.
    Structured,
}

/// Two agents bound to one task for the duration of a run.
///
/// The society exclusively owns its agents; rounds alternate strictly between
/// them and no two invocations are ever in flight at once.
pub struct Society {
    task_prompt: String,
    solver_role_name: String,
    answer_format: AnswerFormat,
    sentinels: SentinelSet,
    instructor: Box<dyn ChatAgent>,
    solver: Box<dyn ChatAgent>,
}

impl Society {
    /// Start configuring a society for a task.
    pub fn builder(task_prompt: impl Into<String>) -> SocietyBuilder {
        SocietyBuilder::new(task_prompt)
    }

    /// The overall task this society was built for.
    pub fn task_prompt(&self) -> &str {
        &self.task_prompt
    }

    /// The sentinel set consulted by the step protocol and the drivers.
    pub fn sentinels(&self) -> &SentinelSet {
        &self.sentinels
    }

    /// Build the first driver input: a solver-role message carrying the
    /// kickoff prompt.
    pub fn init_chat(&self, init_prompt: impl Into<String>) -> ChatMessage {
        ChatMessage::solver(&self.solver_role_name, init_prompt)
    }

    /// Run one instructor→solver exchange, blocking on each agent call.
    ///
    /// The incoming solver message goes to the instructor first; the selected
    /// instruction is inspected for a sentinel before any augmentation, then
    /// an augmented copy goes to the solver. Either agent halting (terminated
    /// or no messages) short-circuits with pass-through responses.
    pub fn step(&mut self, incoming: &ChatMessage) -> Result<StepOutcome> {
        let forwarded = acknowledge_tool_calls(incoming);
        let response = self.instructor.step(forwarded.as_ref().unwrap_or(incoming))?;
        let AgentResponse {
            messages,
            terminated,
            info: instructor_info,
        } = response;
        if terminated || messages.is_empty() {
            return Ok(StepOutcome::instructor_halted(terminated, instructor_info));
        }
        let instructor_msg = reduce_message_options(messages);
        let task_done = self.sentinels.matches(&instructor_msg.content);
        let solver_input = self.augment_for_solver(&instructor_msg, task_done);

        let response = self.solver.step(&solver_input)?;
        let AgentResponse {
            messages,
            terminated,
            info: solver_info,
        } = response;
        if terminated || messages.is_empty() {
            return Ok(StepOutcome::solver_halted(
                terminated,
                solver_info,
                instructor_msg,
                instructor_info,
            ));
        }
        let solver_msg = reduce_message_options(messages);
        let solver_output = self.augment_for_instructor(&solver_msg, task_done);

        Ok(StepOutcome::completed(
            solver_output,
            solver_info,
            solver_input,
            instructor_info,
        ))
    }

    /// Run one instructor→solver exchange, suspending on each agent call.
    ///
    /// Same protocol as [`Society::step`]; the two forms share the selection
    /// and augmentation helpers so their invariants cannot drift apart.
    pub async fn astep(&mut self, incoming: &ChatMessage) -> Result<StepOutcome> {
        let forwarded = acknowledge_tool_calls(incoming);
        let response = self
            .instructor
            .astep(forwarded.as_ref().unwrap_or(incoming))
            .await?;
        let AgentResponse {
            messages,
            terminated,
            info: instructor_info,
        } = response;
        if terminated || messages.is_empty() {
            return Ok(StepOutcome::instructor_halted(terminated, instructor_info));
        }
        let instructor_msg = reduce_message_options(messages);
        let task_done = self.sentinels.matches(&instructor_msg.content);
        let solver_input = self.augment_for_solver(&instructor_msg, task_done);

        let response = self.solver.astep(&solver_input).await?;
        let AgentResponse {
            messages,
            terminated,
            info: solver_info,
        } = response;
        if terminated || messages.is_empty() {
            return Ok(StepOutcome::solver_halted(
                terminated,
                solver_info,
                instructor_msg,
                instructor_info,
            ));
        }
        let solver_msg = reduce_message_options(messages);
        let solver_output = self.augment_for_instructor(&solver_msg, task_done);

        Ok(StepOutcome::completed(
            solver_output,
            solver_info,
            solver_input,
            instructor_info,
        ))
    }

    /// Clone the instruction and append the block matching the completion
    /// state; the original stays untouched for sentinel inspection.
    fn augment_for_solver(&self, instructor_msg: &ChatMessage, task_done: bool) -> ChatMessage {
        let mut augmented = instructor_msg.clone();
        let block = if task_done {
            prompts::final_answer_block(&self.task_prompt, self.answer_format)
        } else {
            prompts::auxiliary_block(&self.task_prompt)
        };
        augmented.content.push_str(&block);
        augmented
    }

    /// Clone the solver's reply; outside the completion branch, append the
    /// next-instruction reminder.
    fn augment_for_instructor(&self, solver_msg: &ChatMessage, task_done: bool) -> ChatMessage {
        let mut augmented = solver_msg.clone();
        if !task_done {
            augmented
                .content
                .push_str(&prompts::next_instruction_block(&self.task_prompt));
        }
        augmented
    }
}

/// Configures and constructs a [`Society`].
pub struct SocietyBuilder {
    task_prompt: String,
    instructor_role_name: String,
    solver_role_name: String,
    answer_format: AnswerFormat,
    sentinels: SentinelSet,
}

impl SocietyBuilder {
    pub fn new(task_prompt: impl Into<String>) -> Self {
        Self {
            task_prompt: task_prompt.into(),
            instructor_role_name: "instructor".to_string(),
            solver_role_name: "solver".to_string(),
            answer_format: AnswerFormat::default(),
            sentinels: SentinelSet::default(),
        }
    }

    /// Override the role names seeded into the agents.
    pub fn with_role_names(
        mut self,
        instructor: impl Into<String>,
        solver: impl Into<String>,
    ) -> Self {
        self.instructor_role_name = instructor.into();
        self.solver_role_name = solver.into();
        self
    }

    /// Set the final-answer format policy.
    pub fn with_answer_format(mut self, format: AnswerFormat) -> Self {
        self.answer_format = format;
        self
    }

    /// Replace the termination sentinel set.
    pub fn with_sentinels(mut self, sentinels: SentinelSet) -> Self {
        self.sentinels = sentinels;
        self
    }

    /// Build both system prompts and hand each agent factory its role
    /// assignment.
    pub fn build<I, S>(self, instructor: I, solver: S) -> Society
    where
        I: FnOnce(RoleAssignment) -> Box<dyn ChatAgent>,
        S: FnOnce(RoleAssignment) -> Box<dyn ChatAgent>,
    {
        let SocietyPrompts {
            instructor: instructor_prompt,
            solver: solver_prompt,
        } = SocietyPrompts::for_task(&self.task_prompt);
        let instructor = instructor(RoleAssignment {
            role_name: self.instructor_role_name,
            kind: RoleKind::Instructor,
            system_prompt: instructor_prompt,
        });
        let solver = solver(RoleAssignment {
            role_name: self.solver_role_name.clone(),
            kind: RoleKind::Solver,
            system_prompt: solver_prompt,
        });
        Society {
            task_prompt: self.task_prompt,
            solver_role_name: self.solver_role_name,
            answer_format: self.answer_format,
            sentinels: self.sentinels,
            instructor,
            solver,
        }
    }
}

/// First-candidate reduction: a multi-candidate response deterministically
/// resolves to its first message in original order; the rest are discarded.
fn reduce_message_options(mut messages: Vec<ChatMessage>) -> ChatMessage {
    if messages.len() > 1 {
        tracing::debug!(
            discarded = messages.len() - 1,
            "multiple candidate messages; keeping the first"
        );
    }
    messages.truncate(1);
    messages.remove(0)
}

/// When the incoming message carries unanswered tool calls, forward a copy
/// acknowledging each call; the caller's message is never mutated.
fn acknowledge_tool_calls(incoming: &ChatMessage) -> Option<ChatMessage> {
    let calls = incoming.tool_calls.as_deref()?;
    if calls.is_empty() || incoming.tool_responses.is_some() {
        return None;
    }
    let mut forwarded = incoming.clone();
    forwarded.tool_responses = Some(
        calls
            .iter()
            .map(|call| ToolResponseRecord {
                tool_call_id: call.tool_call_id.clone(),
                content: serde_json::Value::String(format!(
                    "Tool {} executed successfully",
                    call.tool_name
                )),
                is_error: false,
            })
            .collect(),
    );
    Some(forwarded)
}
