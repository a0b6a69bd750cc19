// End-to-end runs against stand-in encoder scripts
#![cfg(unix)]

use ffopt::engine::{
    EncodeJob, JobRunner, ProfileKind, RunError, RunState, RunnerError, run_job, summary_line,
};
use std::path::Path;
use tempfile::TempDir;

use crate::common::fake_tool::*;
use crate::common::helpers::*;

fn job_for(tool: &Path, input: &Path) -> EncodeJob {
    let profile = store().get(ProfileKind::Software).unwrap();
    EncodeJob::build(tool, input, ProfileKind::Software, profile)
}

#[test]
fn e2e_successful_run_relays_every_line_in_order() {
    let _guard = process_lock();
    let dir = TempDir::new().unwrap();
    let tool = counting_tool(dir.path(), 40, 0);

    let mut runner = JobRunner::new();
    runner
        .start(job_for(&tool, &dir.path().join("clip.mp4")))
        .unwrap();
    assert!(runner.is_running());

    let collected = drain_runner(&mut runner);

    let expected: Vec<String> = (1..=40).map(|i| format!("line {i}")).collect();
    assert_eq!(collected.lines, expected);
    assert_eq!(collected.outcomes.len(), 1, "exactly one completion");

    let outcome = &collected.outcomes[0];
    assert_eq!(
        summary_line(outcome),
        "Video optimization completed successfully!"
    );
    assert!(matches!(runner.state(), RunState::Succeeded(r) if r.exit_code == Some(0)));
}

#[test]
fn e2e_failing_run_reports_exit_code() {
    let _guard = process_lock();
    let dir = TempDir::new().unwrap();
    let tool = counting_tool(dir.path(), 3, 1);

    let mut runner = JobRunner::new();
    runner
        .start(job_for(&tool, &dir.path().join("clip.mp4")))
        .unwrap();
    let collected = drain_runner(&mut runner);

    assert_eq!(collected.lines, vec!["line 1", "line 2", "line 3"]);
    assert_eq!(collected.outcomes.len(), 1);
    assert_eq!(
        summary_line(&collected.outcomes[0]),
        "Video optimization failed! (exit code 1)"
    );
    assert!(!runner.is_running(), "a new run may start after failure");
}

#[test]
fn e2e_tool_receives_arguments_unsplit() {
    let _guard = process_lock();
    let dir = TempDir::new().unwrap();
    let tool = echo_args_tool(dir.path());
    let input = dir.path().join("my clip.mp4");

    let mut lines = Vec::new();
    let outcome = run_job(&job_for(&tool, &input), |line| lines.push(line.to_string()));
    assert!(outcome.unwrap().succeeded);

    let output = dir.path().join("my clip_optimized.mp4");
    let expected = vec![
        "arg=-i".to_string(),
        format!("arg={}", input.display()),
        "arg=-c:v".to_string(),
        "arg=libx264".to_string(),
        "arg=-preset".to_string(),
        "arg=slow".to_string(),
        "arg=-crf".to_string(),
        "arg=20".to_string(),
        format!("arg={}", output.display()),
    ];
    assert_eq!(lines, expected);
}

#[test]
fn e2e_non_executable_tool_is_not_found() {
    let _guard = process_lock();
    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("ffmpeg");
    std::fs::write(&tool, "not a program").unwrap();

    let mut runner = JobRunner::new();
    runner
        .start(job_for(&tool, &dir.path().join("clip.mp4")))
        .unwrap();
    let collected = drain_runner(&mut runner);

    assert!(collected.lines.is_empty());
    assert_eq!(collected.outcomes.len(), 1);
    assert!(matches!(
        collected.outcomes[0],
        Err(RunError::ExecutableNotFound { .. })
    ));
    assert_eq!(
        summary_line(&collected.outcomes[0]),
        format!(
            "FFmpeg executable not found at {}. Make sure it is installed.",
            tool.display()
        )
    );
}

#[test]
fn e2e_second_start_rejected_while_running() {
    let _guard = process_lock();
    let dir = TempDir::new().unwrap();
    let slow = write_tool(dir.path(), "slow-ffmpeg", "sleep 1\necho done");
    let input = dir.path().join("clip.mp4");

    let mut runner = JobRunner::new();
    runner.start(job_for(&slow, &input)).unwrap();
    assert!(matches!(
        runner.start(job_for(&slow, &input)),
        Err(RunnerError::AlreadyRunning)
    ));

    let collected = drain_runner(&mut runner);
    assert_eq!(collected.lines, vec!["done"]);
    assert_eq!(collected.outcomes.len(), 1);

    // Terminal state accepts a new job
    runner.start(job_for(&slow, &input)).unwrap();
    drain_runner(&mut runner);
}
