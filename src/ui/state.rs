// Application state management

use crate::config::Config;
use crate::engine::{
    EncodeJob, JobRunner, PresetStore, ProfileKind, RunnerEvent, derive_output_path,
    summary_line,
};
use crate::ui::UiOptions;
use crate::ui::console::{ConsoleState, LineKind};
use crate::ui::file_picker::FilePickerState;
use ratatui::layout::Rect;
use std::path::{Path, PathBuf};

/// Runner events handled per frame, so a chatty encode cannot starve input
pub const MAX_EVENTS_PER_FRAME: usize = 500;

pub const NOT_FOUND_MESSAGE: &str = "Encoder not found in the config file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    SelectFile,
    Software,
    Hardware,
    Process,
    Console,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::SelectFile,
        Focus::Software,
        Focus::Hardware,
        Focus::Process,
        Focus::Console,
    ];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Screen areas of the clickable controls, captured at render time
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlAreas {
    pub select_file: Rect,
    pub software: Rect,
    pub hardware: Rect,
    pub process: Rect,
    pub console: Rect,
}

pub struct AppState {
    pub presets: PresetStore,
    pub ffmpeg_path: PathBuf,
    pub config: Config,
    /// Where `config` is persisted; `None` keeps settings in memory only
    pub config_path: Option<PathBuf>,

    /// Written only by the UI thread; jobs get a snapshot at start
    pub selected_file: Option<PathBuf>,
    pub profile: ProfileKind,

    pub focus: Focus,
    pub console: ConsoleState,
    pub runner: JobRunner,
    pub file_picker: Option<FilePickerState>,
    pub error_modal: Option<String>,
    pub quit_confirmation: bool,
    pub areas: ControlAreas,
}

impl AppState {
    pub fn new(options: UiOptions) -> Self {
        let UiOptions {
            presets,
            ffmpeg_path,
            profile,
            selected_file,
            config,
            config_path,
        } = options;

        let mut state = Self {
            console: ConsoleState::new(config.console.max_lines),
            presets,
            ffmpeg_path,
            config,
            config_path,
            selected_file: None,
            profile,
            focus: Focus::default(),
            runner: JobRunner::new(),
            file_picker: None,
            error_modal: None,
            quit_confirmation: false,
            areas: ControlAreas::default(),
        };

        if let Some(file) = selected_file {
            state.select_file(file);
        }
        state
    }

    /// Process is clickable only with a file chosen and no encode in flight
    pub fn process_enabled(&self) -> bool {
        self.selected_file.is_some() && !self.runner.is_running()
    }

    pub fn select_file(&mut self, path: PathBuf) {
        self.console
            .push(LineKind::Info, format!("Selected file: {}", path.display()));
        self.selected_file = Some(path);
    }

    pub fn set_profile(&mut self, profile: ProfileKind) {
        self.profile = profile;
    }

    pub fn open_file_picker(&mut self) {
        let start = self.picker_start_dir();
        self.file_picker = Some(FilePickerState::open(&start));
    }

    fn picker_start_dir(&self) -> PathBuf {
        if let Some(dir) = self
            .selected_file
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| dir.is_dir())
        {
            return dir.to_path_buf();
        }
        if let Some(dir) = self.config.defaults.start_dir.as_ref().filter(|d| d.is_dir()) {
            return dir.clone();
        }
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Build a job from the current selection and hand it to the runner
    pub fn process_selected_file(&mut self) {
        if self.runner.is_running() {
            self.console
                .push(LineKind::Error, "A job is already running; wait for it to finish.");
            return;
        }
        let Some(input) = self.selected_file.clone() else {
            return;
        };

        self.console
            .push(LineKind::Info, "Starting video optimization...");
        self.console
            .push(LineKind::Info, format!("Input file: {}", input.display()));
        self.console.push(
            LineKind::Info,
            format!("Output file: {}", derive_output_path(&input).display()),
        );

        let profile = match self.presets.get(self.profile) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "profile lookup failed");
                self.console.push(LineKind::Error, e.to_string());
                self.error_modal = Some(NOT_FOUND_MESSAGE.to_string());
                return;
            }
        };

        let job = EncodeJob::build(&self.ffmpeg_path, &input, self.profile, profile);

        self.console
            .push(LineKind::Info, format!("Encoder: {}", job.profile.encoder));
        self.console.push(LineKind::Info, "FFmpeg command:");
        self.console.push(LineKind::Info, job.display_command());
        self.console.push(LineKind::Info, "");

        self.remember_profile();

        if let Err(e) = self.runner.start(job) {
            self.console.push(LineKind::Error, e.to_string());
        }
    }

    /// Move pending runner output into the console
    pub fn poll_runner(&mut self) {
        for event in self.runner.try_events(MAX_EVENTS_PER_FRAME) {
            match event {
                RunnerEvent::Line(line) => self.console.push(LineKind::Output, line),
                RunnerEvent::Completed(outcome) => {
                    let kind = match &outcome {
                        Ok(result) if result.succeeded => LineKind::Success,
                        _ => LineKind::Error,
                    };
                    self.console.push(kind, summary_line(&outcome));
                }
            }
        }
    }

    fn remember_profile(&mut self) {
        if self.config.defaults.last_used_profile == Some(self.profile) {
            return;
        }
        self.config.defaults.last_used_profile = Some(self.profile);

        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                tracing::warn!("Failed to save last used profile: {:#}", e);
            }
        }
    }
}
