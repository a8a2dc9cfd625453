//! Driver-loop tests: round bounds, sentinel stops, accounting, transcripts.

mod common;

use std::time::Duration;

use common::{reply_with_usage, FailingAgent, ScriptedAgent, SlowAgent};
use pretty_assertions::assert_eq;
use tandem::prelude::*;

#[test]
fn run_stops_when_the_instructor_signals_completion() {
    let mut society = Society::builder("task").build(
        |role| {
            ScriptedAgent::from_texts(
                &role,
                &["Instruction: one", "Instruction: two", "TASK_DONE"],
                &common::seen_log(),
            )
        },
        |role| {
            ScriptedAgent::from_texts(
                &role,
                &["Solution: one", "Solution: two", "Final: 42"],
                &common::seen_log(),
            )
        },
    );

    let run = run_society(&mut society, &DriverConfig::with_round_limit(5)).unwrap();

    assert_eq!(run.transcript.len(), 3);
    assert_eq!(run.answer, "Final: 42");
}

#[test]
fn exhausting_the_round_limit_is_a_quiet_outcome() {
    let mut society = Society::builder("task").build(
        |role| {
            ScriptedAgent::from_texts(
                &role,
                &["Instruction: one", "Instruction: two"],
                &common::seen_log(),
            )
        },
        |role| {
            ScriptedAgent::from_texts(
                &role,
                &["Solution: one", "Solution: two"],
                &common::seen_log(),
            )
        },
    );

    let run = run_society(&mut society, &DriverConfig::with_round_limit(2)).unwrap();

    assert_eq!(run.transcript.len(), 2);
    assert!(run.answer.starts_with("Solution: two"));
}

#[test]
fn usage_accumulates_across_rounds_when_both_sides_report() {
    let instructor_script = vec![
        reply_with_usage(RoleKind::Instructor, "instructor", "Instruction: one", 1, 10),
        reply_with_usage(RoleKind::Instructor, "instructor", "Instruction: two", 2, 20),
        reply_with_usage(RoleKind::Instructor, "instructor", "TASK_DONE", 4, 40),
    ];
    let solver_script = vec![
        reply_with_usage(RoleKind::Solver, "solver", "Solution: one", 8, 80),
        reply_with_usage(RoleKind::Solver, "solver", "Solution: two", 16, 160),
        reply_with_usage(RoleKind::Solver, "solver", "Final: 42", 32, 320),
    ];
    let mut society = Society::builder("task").build(
        move |_role| ScriptedAgent::new(instructor_script, &common::seen_log()),
        move |_role| ScriptedAgent::new(solver_script, &common::seen_log()),
    );

    let run = run_society(&mut society, &DriverConfig::with_round_limit(5)).unwrap();

    // Sum over all three rounds, the terminating one included.
    assert_eq!(run.transcript.len(), 3);
    assert_eq!(run.usage, TokenUsage::new(63, 630));
}

#[test]
fn usage_is_skipped_when_one_side_does_not_report() {
    let instructor_script = vec![reply_with_usage(
        RoleKind::Instructor,
        "instructor",
        "TASK_DONE",
        5,
        50,
    )];
    let mut society = Society::builder("task").build(
        move |_role| ScriptedAgent::new(instructor_script, &common::seen_log()),
        |role| ScriptedAgent::from_texts(&role, &["Final: done"], &common::seen_log()),
    );

    let run = run_society(&mut society, &DriverConfig::with_round_limit(1)).unwrap();

    assert_eq!(run.usage, TokenUsage::default());
}

#[test]
fn transcript_records_solver_tool_calls_in_order() {
    let calls = vec![
        ToolCallRecord {
            tool_call_id: "call-1".into(),
            tool_name: "search".into(),
            args: serde_json::json!({"q": "bridges"}),
            result: Some(serde_json::json!({"hits": 3})),
        },
        ToolCallRecord {
            tool_call_id: "call-2".into(),
            tool_name: "browse".into(),
            args: serde_json::json!({"url": "https://example.com"}),
            result: None,
        },
    ];
    let solver_reply = AgentResponse::of(ChatMessage::solver("solver", "Final: 42")).with_info(
        ResponseInfo {
            usage: None,
            tool_calls: calls.clone(),
        },
    );
    let mut society = Society::builder("task").build(
        |role| ScriptedAgent::from_texts(&role, &["TASK_DONE"], &common::seen_log()),
        move |_role| ScriptedAgent::new(vec![solver_reply], &common::seen_log()),
    );

    let run = run_society(&mut society, &DriverConfig::with_round_limit(1)).unwrap();

    assert_eq!(run.transcript[0].tool_calls, calls);
}

#[test]
fn agent_errors_propagate_to_the_caller() {
    let mut society = Society::builder("task").build(
        FailingAgent::new,
        |role| ScriptedAgent::from_texts(&role, &["Solution: never"], &common::seen_log()),
    );

    let err = run_society(&mut society, &DriverConfig::with_round_limit(1)).unwrap_err();
    assert!(matches!(err, TandemError::Agent { .. }));
}

#[test]
fn zero_round_limit_fails_with_empty_transcript() {
    let mut society = Society::builder("task").build(
        |role| ScriptedAgent::from_texts(&role, &["Instruction: go"], &common::seen_log()),
        |role| ScriptedAgent::from_texts(&role, &["Solution: ok"], &common::seen_log()),
    );

    let err = run_society(&mut society, &DriverConfig::with_round_limit(0)).unwrap_err();
    assert!(matches!(err, TandemError::EmptyTranscript));
}

#[test]
fn terminating_first_round_still_records_one_entry() {
    let halted = AgentResponse::of(ChatMessage::solver("solver", "")).with_terminated(true);
    let mut society = Society::builder("task").build(
        |role| ScriptedAgent::from_texts(&role, &["Instruction: go"], &common::seen_log()),
        move |_role| ScriptedAgent::new(vec![halted], &common::seen_log()),
    );

    let run = run_society(&mut society, &DriverConfig::with_round_limit(1)).unwrap();

    assert_eq!(run.transcript.len(), 1);
    assert_eq!(run.transcript[0].instructor, "Instruction: go");
    assert_eq!(run.transcript[0].solver, "");
    assert_eq!(run.answer, "");
}

#[test]
fn empty_instructor_response_without_termination_stops_quietly() {
    let mut society = Society::builder("task").build(
        move |_role| ScriptedAgent::new(vec![AgentResponse::empty()], &common::seen_log()),
        |role| ScriptedAgent::from_texts(&role, &["Solution: unreached"], &common::seen_log()),
    );

    let run = run_society(&mut society, &DriverConfig::with_round_limit(3)).unwrap();

    assert_eq!(run.transcript.len(), 1);
    assert_eq!(run.transcript[0].instructor, "");
    assert_eq!(run.answer, "");
}

#[test]
fn sync_driver_recognizes_the_localized_sentinel() {
    let mut society = Society::builder("task").build(
        |role| ScriptedAgent::from_texts(&role, &["任务已完成"], &common::seen_log()),
        |role| ScriptedAgent::from_texts(&role, &["Final: done"], &common::seen_log()),
    );

    let run = run_society(&mut society, &DriverConfig::with_round_limit(5)).unwrap();
    assert_eq!(run.transcript.len(), 1);
}

#[tokio::test]
async fn async_driver_recognizes_the_localized_sentinel() {
    let mut society = Society::builder("task").build(
        |role| ScriptedAgent::from_texts(&role, &["任务已完成"], &common::seen_log()),
        |role| ScriptedAgent::from_texts(&role, &["Final: done"], &common::seen_log()),
    );

    let run = arun_society(&mut society, &DriverConfig::with_round_limit(5))
        .await
        .unwrap();
    assert_eq!(run.transcript.len(), 1);
}

#[test]
fn custom_sentinel_set_replaces_the_default() {
    let mut society = Society::builder("task")
        .with_sentinels(SentinelSet::single("FERTIG"))
        .build(
            |role| ScriptedAgent::from_texts(&role, &["TASK_DONE", "FERTIG"], &common::seen_log()),
            |role| {
                ScriptedAgent::from_texts(
                    &role,
                    &["Solution: a", "Final: b"],
                    &common::seen_log(),
                )
            },
        );

    let run = run_society(&mut society, &DriverConfig::with_round_limit(5)).unwrap();

    // TASK_DONE no longer terminates; the configured token does.
    assert_eq!(run.transcript.len(), 2);
    assert_eq!(run.answer, "Final: b");
}

#[tokio::test]
async fn async_and_sync_drivers_agree() {
    let build = || {
        Society::builder("task").build(
            |role| {
                ScriptedAgent::from_texts(
                    &role,
                    &["Instruction: one", "TASK_DONE"],
                    &common::seen_log(),
                )
            },
            |role| {
                ScriptedAgent::from_texts(
                    &role,
                    &["Solution: one", "Final: 42"],
                    &common::seen_log(),
                )
            },
        )
    };
    let config = DriverConfig::with_round_limit(5);

    let sync_run = run_society(&mut build(), &config).unwrap();
    let async_run = arun_society(&mut build(), &config).await.unwrap();

    assert_eq!(sync_run.transcript, async_run.transcript);
    assert_eq!(sync_run.usage, async_run.usage);
    assert_eq!(sync_run.answer, async_run.answer);
}

#[tokio::test(start_paused = true)]
async fn slow_agent_trips_the_step_guard() {
    let mut society = Society::builder("task").build(
        |role| SlowAgent::new(role, Duration::from_secs(60)),
        |role| SlowAgent::new(role, Duration::from_secs(60)),
    );
    let config = DriverConfig::builder()
        .round_limit(3)
        .step_timeout(Duration::from_secs(5))
        .build();

    let err = arun_society(&mut society, &config).await.unwrap_err();
    assert!(matches!(err, TandemError::Timeout(5000)));
}
