use clap::{Parser, Subcommand};
use ffopt::engine::ProfileKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffopt")]
#[command(about = "Video optimizer with software/hardware ffmpeg presets", long_about = None)]
pub struct Cli {
    /// Video file to preselect in the UI
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Encoding profile to use (defaults to the last one used)
    #[arg(long, value_enum, global = true)]
    pub profile: Option<ProfileKind>,

    /// Directory containing software-config.json and hardware-config.json
    #[arg(long, value_name = "DIR", global = true)]
    pub presets_dir: Option<PathBuf>,

    /// Path to the ffmpeg executable
    #[arg(long, value_name = "PATH", global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// Log file (defaults to ffopt.log in the current directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the configured ffmpeg can be run
    CheckFfmpeg,

    /// Show the ffmpeg command for a file without running it
    DryRun {
        /// Input video file
        file: PathBuf,
    },

    /// Encode one file without the UI, printing ffmpeg's output
    Encode {
        /// Input video file
        file: PathBuf,
    },

    /// Write starter preset files and the settings file
    InitConfig {
        /// Replace preset files that already exist
        #[arg(long)]
        overwrite: bool,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
