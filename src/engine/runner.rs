// Runs one encode on a background thread and relays its output line by line

use super::job::EncodeJob;
use super::lines::relay_lines;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Final status of a run that got as far as launching the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobResult {
    /// `None` when the tool was killed by a signal
    pub exit_code: Option<i32>,
    pub succeeded: bool,
}

impl JobResult {
    pub fn from_status(status: ExitStatus) -> Self {
        Self {
            exit_code: status.code(),
            succeeded: status.success(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("No command to run")]
    EmptyCommand,

    #[error("FFmpeg executable not found at {}: {source}", .path.display())]
    ExecutableNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create output pipe: {0}")]
    Pipe(#[source] io::Error),

    #[error("Failed to read ffmpeg output: {0}")]
    Read(#[source] io::Error),

    #[error("Failed to wait for ffmpeg: {0}")]
    Wait(#[source] io::Error),

    #[error("Encode worker stopped without reporting a result")]
    WorkerLost,
}

pub type JobOutcome = Result<JobResult, RunError>;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("A job is already running")]
    AlreadyRunning,
}

/// Console line describing how a run ended
pub fn summary_line(outcome: &JobOutcome) -> String {
    match outcome {
        Ok(result) if result.succeeded => "Video optimization completed successfully!".to_string(),
        Ok(JobResult {
            exit_code: Some(code),
            ..
        }) => format!("Video optimization failed! (exit code {code})"),
        Ok(_) => "Video optimization failed! (terminated by signal)".to_string(),
        Err(RunError::ExecutableNotFound { path, .. }) => format!(
            "FFmpeg executable not found at {}. Make sure it is installed.",
            path.display()
        ),
        Err(e) => format!("Video optimization failed! {e}"),
    }
}

/// Run `argv` to completion, calling `on_line` for each line of its merged
/// stdout/stderr as soon as the line is complete.
///
/// Both output streams share one pipe, so lines arrive in the order the tool
/// wrote them. The stream ends only once every write end is closed; the exit
/// status is collected after that, so no trailing output is lost.
pub fn run_command<F>(argv: &[OsString], mut on_line: F) -> JobOutcome
where
    F: FnMut(&str),
{
    let (program, args) = argv.split_first().ok_or(RunError::EmptyCommand)?;

    let (reader, writer) = io::pipe().map_err(RunError::Pipe)?;
    let writer_err = writer.try_clone().map_err(RunError::Pipe)?;

    // The Command (and our copies of the write ends) drop at the end of this
    // statement, otherwise the reader would never see end-of-stream.
    let spawned = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(writer_err)
        .spawn();

    let mut child = spawned.map_err(|source| RunError::ExecutableNotFound {
        path: PathBuf::from(program),
        source,
    })?;

    let relayed = relay_lines(reader, &mut on_line);

    // Reap the child even if reading failed; the dropped reader makes it exit
    let status = child.wait().map_err(RunError::Wait)?;
    let lines = relayed.map_err(RunError::Read)?;

    debug!(pid = child.id(), lines, %status, "process finished");
    Ok(JobResult::from_status(status))
}

/// Run one encode job on the current thread
pub fn run_job<F>(job: &EncodeJob, on_line: F) -> JobOutcome
where
    F: FnMut(&str),
{
    info!(
        job_id = %job.id,
        profile = %job.profile_kind,
        input = %job.input_path.display(),
        output = %job.output_path.display(),
        "starting encode"
    );

    let outcome = run_command(&job.argv, on_line);

    match &outcome {
        Ok(result) if result.succeeded => info!(job_id = %job.id, "encode finished"),
        Ok(result) => warn!(job_id = %job.id, exit_code = ?result.exit_code, "encode failed"),
        Err(e) => warn!(job_id = %job.id, error = %e, "encode could not run"),
    }

    outcome
}

/// Run `job` on a new thread. `on_complete` is called exactly once, after the
/// last `on_line`.
pub fn spawn_job<L, C>(job: EncodeJob, mut on_line: L, on_complete: C) -> JoinHandle<()>
where
    L: FnMut(&str) + Send + 'static,
    C: FnOnce(JobOutcome) + Send + 'static,
{
    thread::spawn(move || {
        let outcome = run_job(&job, &mut on_line);
        on_complete(outcome);
    })
}

/// Message from the encode worker to the thread that owns the runner
#[derive(Debug)]
pub enum RunnerEvent {
    Line(String),
    Completed(JobOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Succeeded(JobResult),
    Failed(String),
}

/// Owns at most one in-flight encode and the channel its worker reports on.
///
/// Events must be drained from the owning thread with [`JobRunner::try_events`]
/// or [`JobRunner::recv`]; the state only leaves `Running` when the
/// `Completed` event is drained.
#[derive(Debug, Default)]
pub struct JobRunner {
    state: RunState,
    rx: Option<Receiver<RunnerEvent>>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Start `job` in the background. Rejected while another job is running.
    pub fn start(&mut self, job: EncodeJob) -> Result<(), RunnerError> {
        if self.is_running() {
            return Err(RunnerError::AlreadyRunning);
        }

        // Fresh channel per run so a lost worker shows up as a disconnect
        let (tx, rx) = mpsc::channel();
        let tx_line = tx.clone();

        spawn_job(
            job,
            move |line| {
                let _ = tx_line.send(RunnerEvent::Line(line.to_string()));
            },
            move |outcome| {
                let _ = tx.send(RunnerEvent::Completed(outcome));
            },
        );

        self.rx = Some(rx);
        self.state = RunState::Running;
        Ok(())
    }

    /// Drain up to `limit` pending events without blocking
    pub fn try_events(&mut self, limit: usize) -> Vec<RunnerEvent> {
        let mut events = Vec::new();

        while events.len() < limit {
            let Some(rx) = &self.rx else { break };

            match rx.try_recv() {
                Ok(event) => {
                    let done = self.observe(&event);
                    events.push(event);
                    if done {
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    let event = RunnerEvent::Completed(Err(RunError::WorkerLost));
                    self.observe(&event);
                    events.push(event);
                    break;
                }
            }
        }

        events
    }

    /// Block until the next event. `None` when no job is running.
    pub fn recv(&mut self) -> Option<RunnerEvent> {
        let rx = self.rx.as_ref()?;
        let event = rx
            .recv()
            .unwrap_or_else(|_| RunnerEvent::Completed(Err(RunError::WorkerLost)));
        self.observe(&event);
        Some(event)
    }

    /// Track completion; returns true for the run's final event
    fn observe(&mut self, event: &RunnerEvent) -> bool {
        let RunnerEvent::Completed(outcome) = event else {
            return false;
        };

        self.rx = None;
        self.state = match outcome {
            Ok(result) if result.succeeded => RunState::Succeeded(*result),
            Ok(_) | Err(_) => RunState::Failed(summary_line(outcome)),
        };
        true
    }
}
