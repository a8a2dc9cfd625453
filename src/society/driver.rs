//! Bounded round loops driving a society to completion.

use std::time::Duration;

use bon::Builder;
use uuid::Uuid;

use crate::error::{Result, TandemError};
use crate::types::TokenUsage;

use super::prompts;
use super::session::Society;
use super::types::{SocietyRun, StepOutcome, TranscriptEntry};

/// Unique run identifier.
pub type RunId = Uuid;

/// Settings controlling a driver run.
#[derive(Debug, Clone, Builder)]
pub struct DriverConfig {
    /// Upper bound on instructor→solver rounds.
    #[builder(default = 15)]
    pub round_limit: usize,
    /// Guard applied to each agent invocation by the asynchronous driver.
    /// `None` lets a call block the run indefinitely; the synchronous driver
    /// cannot interrupt a blocking call and ignores this.
    pub step_timeout: Option<Duration>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            round_limit: 15,
            step_timeout: None,
        }
    }
}

impl DriverConfig {
    /// Config with the given round limit and no step guard.
    pub fn with_round_limit(round_limit: usize) -> Self {
        Self {
            round_limit,
            step_timeout: None,
        }
    }
}

/// Drive the society until a sentinel, a termination, or the round limit.
///
/// Exhausting the round limit is a quiet outcome: the caller receives
/// whatever transcript exists and interprets the unfinished run. The failure
/// modes are agent errors and a run that committed no round at all
/// ([`TandemError::EmptyTranscript`], a round limit of zero).
pub fn run_society(society: &mut Society, config: &DriverConfig) -> Result<SocietyRun> {
    let run_id: RunId = Uuid::new_v4();
    let mut usage = TokenUsage::default();
    let mut transcript = Vec::new();
    let mut input = society.init_chat(prompts::KICKOFF_PROMPT);

    for round in 0..config.round_limit {
        let outcome = society.step(&input)?;
        accumulate_usage(&mut usage, &outcome);
        transcript.push(record_round(&outcome));
        tracing::info!(
            %run_id,
            round,
            instructor = %outcome.instructor.content(),
            solver = %outcome.solver.content(),
            "round committed"
        );
        if exchange_finished(society, &outcome) {
            break;
        }
        match outcome.solver.reduce() {
            Some(message) => input = message.clone(),
            None => break,
        }
    }

    finish_run(run_id, transcript, usage)
}

/// Asynchronous form of [`run_society`]: the same algorithm with suspending
/// agent invocations, optionally guarded by [`DriverConfig::step_timeout`].
pub async fn arun_society(society: &mut Society, config: &DriverConfig) -> Result<SocietyRun> {
    let run_id: RunId = Uuid::new_v4();
    let mut usage = TokenUsage::default();
    let mut transcript = Vec::new();
    let mut input = society.init_chat(prompts::KICKOFF_PROMPT);

    for round in 0..config.round_limit {
        let outcome = match config.step_timeout {
            Some(limit) => tokio::time::timeout(limit, society.astep(&input))
                .await
                .map_err(|_| TandemError::Timeout(limit.as_millis() as u64))??,
            None => society.astep(&input).await?,
        };
        accumulate_usage(&mut usage, &outcome);
        transcript.push(record_round(&outcome));
        tracing::info!(
            %run_id,
            round,
            instructor = %outcome.instructor.content(),
            solver = %outcome.solver.content(),
            "round committed"
        );
        if exchange_finished(society, &outcome) {
            break;
        }
        match outcome.solver.reduce() {
            Some(message) => input = message.clone(),
            None => break,
        }
    }

    finish_run(run_id, transcript, usage)
}

/// Usage is added only when both sides report it, and never reset mid-run.
fn accumulate_usage(usage: &mut TokenUsage, outcome: &StepOutcome) {
    if let (Some(solver), Some(instructor)) =
        (&outcome.solver.info.usage, &outcome.instructor.info.usage)
    {
        usage.merge(solver);
        usage.merge(instructor);
    }
}

/// Build the round's transcript entry; a side that produced no message is
/// recorded as the empty string.
fn record_round(outcome: &StepOutcome) -> TranscriptEntry {
    TranscriptEntry {
        instructor: outcome.instructor.content().to_string(),
        solver: outcome.solver.content().to_string(),
        tool_calls: outcome.solver.info.tool_calls.clone(),
    }
}

/// A round ends the run when either side terminated or the solver-facing
/// content carries a sentinel.
fn exchange_finished(society: &Society, outcome: &StepOutcome) -> bool {
    outcome.solver.terminated
        || outcome.instructor.terminated
        || society.sentinels().matches(outcome.instructor.content())
}

fn finish_run(
    run_id: RunId,
    transcript: Vec<TranscriptEntry>,
    usage: TokenUsage,
) -> Result<SocietyRun> {
    let answer = match transcript.last() {
        Some(entry) => entry.solver.clone(),
        None => return Err(TandemError::EmptyTranscript),
    };
    tracing::debug!(%run_id, rounds = transcript.len(), "run finished");
    Ok(SocietyRun {
        answer,
        transcript,
        usage,
    })
}
