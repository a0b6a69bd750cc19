// Builds the ffmpeg invocation for one encode

use super::presets::{EncoderProfile, ProfileKind};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Extension the file browser offers
pub const MEDIA_EXTENSION: &str = "mp4";

/// Appended to the input's stem to name the output
pub const OUTPUT_SUFFIX: &str = "_optimized.mp4";

/// Check if a path has the supported media extension
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MEDIA_EXTENSION))
}

/// `<dir>/<stem>_optimized.mp4` for an input `<dir>/<stem>.<ext>`
pub fn derive_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path
        .file_stem()
        .unwrap_or_else(|| OsStr::new("output"));

    let mut file_name = stem.to_os_string();
    file_name.push(OUTPUT_SUFFIX);

    input_path.with_file_name(file_name)
}

/// Immutable snapshot of one run, handed to the worker thread.
#[derive(Debug, Clone)]
pub struct EncodeJob {
    pub id: Uuid,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub profile_kind: ProfileKind,
    pub profile: EncoderProfile,
    /// Program followed by its arguments
    pub argv: Vec<OsString>,
}

impl EncodeJob {
    /// Build the job for `input_path`.
    ///
    /// The argument order is fixed:
    /// `executable -i <input> -c:v <encoder> <common params...> <output>`.
    /// Parameters are passed through untouched; nothing is re-split or quoted.
    pub fn build(
        executable: &Path,
        input_path: &Path,
        profile_kind: ProfileKind,
        profile: EncoderProfile,
    ) -> Self {
        let output_path = derive_output_path(input_path);

        let mut argv: Vec<OsString> = Vec::with_capacity(6 + profile.common_params.len());
        argv.push(executable.as_os_str().to_os_string());
        argv.push("-i".into());
        argv.push(input_path.as_os_str().to_os_string());
        argv.push("-c:v".into());
        argv.push(profile.encoder.clone().into());
        argv.extend(profile.common_params.iter().map(OsString::from));
        argv.push(output_path.as_os_str().to_os_string());

        Self {
            id: Uuid::new_v4(),
            input_path: input_path.to_path_buf(),
            output_path,
            profile_kind,
            profile,
            argv,
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.argv[0]
    }

    pub fn args(&self) -> &[OsString] {
        &self.argv[1..]
    }

    /// Arguments as UTF-8 (lossy), mostly for display and tests
    pub fn argv_lossy(&self) -> Vec<String> {
        self.argv
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    /// Format the command as a shell-safe string for the console
    pub fn display_command(&self) -> String {
        format_command(&self.argv)
    }
}

/// Join an argument vector into one line, quoting arguments a shell would split
pub fn format_command(argv: &[OsString]) -> String {
    argv.iter()
        .map(|arg| {
            let s = arg.to_string_lossy();
            match shlex::try_quote(&s) {
                Ok(quoted) => quoted.into_owned(),
                // Only fails on interior NUL, which no real path contains
                Err(_) => s.into_owned(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
