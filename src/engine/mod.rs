// Core encoding engine - independent of UI

pub mod ffmpeg_info;
pub mod job;
pub mod lines;
pub mod presets;
pub mod runner;

pub use ffmpeg_info::ffmpeg_version;
pub use job::{EncodeJob, derive_output_path, format_command, is_media_file};
pub use presets::{ConfigError, EncoderProfile, PresetStore, ProfileKind};
pub use runner::{
    JobOutcome, JobResult, JobRunner, RunError, RunState, RunnerError, RunnerEvent, run_command,
    run_job, spawn_job, summary_line,
};
