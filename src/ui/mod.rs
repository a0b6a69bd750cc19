// Terminal UI using Ratatui

pub mod components;
pub mod console;
pub mod events;
pub mod file_picker;
pub mod main_screen;
pub mod modal;
pub mod state;

use crate::config::Config;
use crate::engine::{PresetStore, ProfileKind};
use std::path::PathBuf;

pub use console::{ConsoleState, ConsoleView, LineKind};
pub use events::run_ui;
pub use file_picker::{FilePicker, FilePickerState};
pub use main_screen::MainScreen;
pub use modal::{ErrorModal, QuitModal};
pub use state::AppState;

/// Everything the UI needs from startup
pub struct UiOptions {
    pub presets: PresetStore,
    pub ffmpeg_path: PathBuf,
    pub profile: ProfileKind,
    /// File to preselect (from the command line)
    pub selected_file: Option<PathBuf>,
    pub config: Config,
    pub config_path: Option<PathBuf>,
}
