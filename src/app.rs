use crate::cli::{Cli, Commands};
use ffopt::config::Config;
use ffopt::engine::{self, EncodeJob, JobRunner, PresetStore, ProfileKind, RunnerEvent};
use ffopt::ui;
use std::path::{Path, PathBuf};
use std::process;

/// Settings plus the command-line overrides that apply to every command
struct Context {
    config: Config,
    profile: Option<ProfileKind>,
    presets_dir: Option<PathBuf>,
    ffmpeg: Option<PathBuf>,
}

impl Context {
    fn profile(&self) -> ProfileKind {
        self.profile.unwrap_or_else(|| self.config.initial_profile())
    }

    fn ffmpeg_path(&self) -> PathBuf {
        self.config.ffmpeg_path(self.ffmpeg.as_deref())
    }

    /// Missing or invalid preset files end the program
    fn load_presets(&self) -> PresetStore {
        let dir = match self.config.presets_dir(self.presets_dir.as_deref()) {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                process::exit(1);
            }
        };

        match PresetStore::load(&dir) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!(error = %e, "failed to load presets");
                eprintln!("Error: {}", e);
                eprintln!("Run 'ffopt init-config' to create starter presets in {}", dir.display());
                process::exit(1);
            }
        }
    }

    fn build_job(&self, presets: &PresetStore, file: &Path) -> EncodeJob {
        let kind = self.profile();
        match presets.get(kind) {
            Ok(profile) => EncodeJob::build(&self.ffmpeg_path(), file, kind, profile),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}

pub fn run(cli: Cli) {
    let ctx = Context {
        config: Config::load_or_default(),
        profile: cli.profile,
        presets_dir: cli.presets_dir,
        ffmpeg: cli.ffmpeg,
    };

    if let Some(command) = cli.command {
        match command {
            Commands::CheckFfmpeg => handle_check_ffmpeg(&ctx),
            Commands::DryRun { file } => handle_dry_run(&ctx, &file),
            Commands::Encode { file } => handle_encode(&ctx, &file),
            Commands::InitConfig { overwrite } => handle_init_config(&ctx, overwrite),
        }
        return;
    }

    // Launch TUI (default behavior)
    let presets = ctx.load_presets();
    let options = ui::UiOptions {
        presets,
        ffmpeg_path: ctx.ffmpeg_path(),
        profile: ctx.profile(),
        selected_file: cli.file,
        config: ctx.config.clone(),
        config_path: Config::config_path().ok(),
    };

    if let Err(e) = ui::run_ui(options) {
        eprintln!("Error running UI: {}", e);
        process::exit(1);
    }
}

fn handle_check_ffmpeg(ctx: &Context) {
    let ffmpeg = ctx.ffmpeg_path();
    match engine::ffmpeg_version(&ffmpeg) {
        Ok(version) => {
            println!("ffmpeg found at {}: {}", ffmpeg.display(), version);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn handle_dry_run(ctx: &Context, file: &Path) {
    let presets = ctx.load_presets();
    let job = ctx.build_job(&presets, file);
    println!("{}", job.display_command());
}

fn handle_encode(ctx: &Context, file: &Path) {
    let presets = ctx.load_presets();
    let job = ctx.build_job(&presets, file);

    println!("Input file: {}", job.input_path.display());
    println!("Output file: {}", job.output_path.display());
    println!("Encoder: {}", job.profile.encoder);
    println!("FFmpeg command:");
    println!("{}", job.display_command());
    println!();

    let mut runner = JobRunner::new();
    if let Err(e) = runner.start(job) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    while let Some(event) = runner.recv() {
        match event {
            RunnerEvent::Line(line) => println!("{}", line),
            RunnerEvent::Completed(outcome) => {
                println!("{}", engine::summary_line(&outcome));
                let code = match outcome {
                    Ok(result) if result.succeeded => 0,
                    Ok(result) => result.exit_code.unwrap_or(1),
                    Err(_) => 1,
                };
                process::exit(code);
            }
        }
    }
}

fn handle_init_config(ctx: &Context, overwrite: bool) {
    let dir = match ctx.config.presets_dir(ctx.presets_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    match engine::presets::write_defaults(&dir, overwrite) {
        Ok(written) if written.is_empty() => {
            println!("Preset files already exist in {}", dir.display());
        }
        Ok(written) => {
            for path in written {
                println!("Wrote preset {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("Failed to write presets: {:#}", e);
            process::exit(1);
        }
    }

    match Config::config_path() {
        Ok(path) if path.exists() => println!("Settings file: {}", path.display()),
        Ok(path) => match ctx.config.save_to(&path) {
            Ok(()) => println!("Default settings saved to {}", path.display()),
            Err(e) => {
                eprintln!("Failed to save default settings: {:#}", e);
                process::exit(1);
            }
        },
        Err(e) => println!("Settings path unknown: {:#}", e),
    }
}
