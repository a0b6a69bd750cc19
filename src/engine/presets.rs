// Encoder presets loaded from the two JSON documents next to the program

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// The two encoding profiles a user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    #[default]
    Software,
    Hardware,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 2] = [ProfileKind::Software, ProfileKind::Hardware];

    pub fn name(self) -> &'static str {
        match self {
            Self::Software => "software",
            Self::Hardware => "hardware",
        }
    }

    /// Label shown next to the radio control
    pub fn label(self) -> &'static str {
        match self {
            Self::Software => "Software Encoding",
            Self::Hardware => "Hardware Encoding",
        }
    }

    /// Name of the preset document backing this profile
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Software => "software-config.json",
            Self::Hardware => "hardware-config.json",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Software => Self::Hardware,
            Self::Hardware => Self::Software,
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProfileKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "software" => Ok(Self::Software),
            "hardware" => Ok(Self::Hardware),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("Invalid config file {}: {source}", .path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not read config file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Encoder not found in the {0} config file")]
    ProfileNotFound(ProfileKind),

    #[error("Unknown profile '{0}' (expected 'software' or 'hardware')")]
    UnknownProfile(String),
}

/// Encoder id plus the parameters passed after it, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderProfile {
    pub encoder: String,
    pub common_params: Vec<String>,
}

/// On-disk shape of one preset document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetDocument {
    #[serde(rename = "Encoder", default, skip_serializing_if = "Option::is_none")]
    pub encoder: Option<String>,

    #[serde(rename = "CommonParams", default)]
    pub common_params: Vec<String>,
}

impl PresetDocument {
    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(|source| ConfigError::MalformedDocument {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Both presets, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
    software: PresetDocument,
    hardware: PresetDocument,
}

impl PresetStore {
    /// Load `software-config.json` and `hardware-config.json` from `dir`
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let software = read_document(&dir.join(ProfileKind::Software.file_name()))?;
        let hardware = read_document(&dir.join(ProfileKind::Hardware.file_name()))?;

        tracing::info!(dir = %dir.display(), "loaded encoder presets");

        Ok(Self {
            dir: dir.to_path_buf(),
            software,
            hardware,
        })
    }

    /// Parse both documents from memory. Errors name the document's file name.
    pub fn from_documents(software_json: &str, hardware_json: &str) -> Result<Self, ConfigError> {
        let software =
            PresetDocument::parse(Path::new(ProfileKind::Software.file_name()), software_json)?;
        let hardware =
            PresetDocument::parse(Path::new(ProfileKind::Hardware.file_name()), hardware_json)?;

        Ok(Self {
            dir: PathBuf::new(),
            software,
            hardware,
        })
    }

    /// Directory the presets were loaded from (empty for in-memory stores)
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn document(&self, kind: ProfileKind) -> &PresetDocument {
        match kind {
            ProfileKind::Software => &self.software,
            ProfileKind::Hardware => &self.hardware,
        }
    }

    /// Look up a profile. A document without an `Encoder` key is reported, not fatal.
    pub fn get(&self, kind: ProfileKind) -> Result<EncoderProfile, ConfigError> {
        let doc = self.document(kind);
        let encoder = doc
            .encoder
            .clone()
            .ok_or(ConfigError::ProfileNotFound(kind))?;

        Ok(EncoderProfile {
            encoder,
            common_params: doc.common_params.clone(),
        })
    }
}

fn read_document(path: &Path) -> Result<PresetDocument, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    PresetDocument::parse(path, &contents)
}

/// Starter document for a profile
pub fn default_document(kind: ProfileKind) -> PresetDocument {
    let (encoder, params): (&str, &[&str]) = match kind {
        ProfileKind::Software => (
            "libx264",
            &[
                "-preset", "slow", "-crf", "20", "-profile:v", "high", "-pix_fmt", "yuv420p",
                "-c:a", "aac", "-b:a", "128k", "-ar", "44100", "-movflags", "+faststart",
            ],
        ),
        ProfileKind::Hardware => (
            "h264_nvenc",
            &[
                "-preset", "p6", "-rc", "vbr", "-cq", "21", "-profile:v", "high", "-pix_fmt",
                "yuv420p", "-c:a", "aac", "-b:a", "128k", "-ar", "44100", "-movflags",
                "+faststart",
            ],
        ),
    };

    PresetDocument {
        encoder: Some(encoder.to_string()),
        common_params: params.iter().map(|p| p.to_string()).collect(),
    }
}

/// Write the starter preset documents into `dir`.
/// Existing files are kept unless `overwrite` is set. Returns the files written.
pub fn write_defaults(dir: &Path, overwrite: bool) -> anyhow::Result<Vec<PathBuf>> {
    use anyhow::Context;

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create presets directory: {}", dir.display()))?;

    let mut written = Vec::new();
    for kind in ProfileKind::ALL {
        let path = dir.join(kind.file_name());
        if path.exists() && !overwrite {
            continue;
        }

        let contents = serde_json::to_string_pretty(&default_document(kind))
            .context("Failed to serialize preset")?;
        fs::write(&path, contents + "\n")
            .with_context(|| format!("Failed to write preset file: {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
