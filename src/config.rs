// User settings (TOML) and path resolution for presets and ffmpeg

use crate::engine::ProfileKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub encoder: EncoderConfig,

    #[serde(default)]
    pub presets: PresetsConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Explicit ffmpeg executable; auto-detected when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetsConfig {
    /// Directory holding software-config.json and hardware-config.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Profile selected when the UI opens
    #[serde(default)]
    pub profile: ProfileKind,

    /// Last profile used for an encode (restored on restart)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_profile: Option<ProfileKind>,

    /// Directory the file browser opens in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Lines kept in the console before the oldest are dropped
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
}

fn default_max_lines() -> usize {
    5000
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join("ffopt")
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("ffopt")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;

            let config: Config = toml::from_str(&contents).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?;

            Ok(config)
        } else {
            let config = Config::default();

            // Not being able to write the default file is not fatal
            if let Err(e) = config.save_to(config_path) {
                tracing::warn!(
                    "Could not create default config file: {:#}. Run 'ffopt init-config' to create one.",
                    e
                );
            }

            Ok(config)
        }
    }

    /// Load, falling back to defaults (with a warning) when the file is unusable
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Using built-in settings: {:#}", e);
            Self::default()
        })
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Profile the UI should start with
    pub fn initial_profile(&self) -> ProfileKind {
        self.defaults
            .last_used_profile
            .unwrap_or(self.defaults.profile)
    }

    /// Presets directory: explicit override, then config, then next to the executable
    pub fn presets_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.presets.dir {
            return Ok(dir.clone());
        }
        program_dir()
    }

    /// ffmpeg executable: explicit override, config, bundled copy, then PATH
    pub fn ffmpeg_path(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_override {
            return path.to_path_buf();
        }
        if let Some(path) = &self.encoder.ffmpeg_path {
            return path.clone();
        }

        let mut candidates = Vec::new();
        if let Ok(dir) = program_dir() {
            candidates.push(dir.join(BUNDLED_FFMPEG_DIR).join(ffmpeg_file_name()));
        }
        candidates.push(Path::new(".").join(BUNDLED_FFMPEG_DIR).join(ffmpeg_file_name()));

        candidates
            .into_iter()
            .find(|candidate| candidate.is_file())
            .unwrap_or_else(|| PathBuf::from("ffmpeg"))
    }
}

/// Subdirectory a bundled ffmpeg build is looked up in
const BUNDLED_FFMPEG_DIR: &str = "ffmpeg";

fn ffmpeg_file_name() -> &'static str {
    if cfg!(windows) { "ffmpeg.exe" } else { "ffmpeg" }
}

/// Directory containing the running executable
pub fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Could not determine program location")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("Program location has no parent directory")
}
