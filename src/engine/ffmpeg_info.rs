use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Run `<ffmpeg> -version` and return the first line of its output
pub fn ffmpeg_version(ffmpeg: &Path) -> Result<String> {
    let output = Command::new(ffmpeg)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
        .with_context(|| {
            format!(
                "Failed to execute {}. Is ffmpeg installed?",
                ffmpeg.display()
            )
        })?;

    if !output.status.success() {
        anyhow::bail!("ffmpeg -version failed with status: {}", output.status);
    }

    Ok(first_version_line(&String::from_utf8_lossy(&output.stdout)))
}

fn first_version_line(stdout: &str) -> String {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Unknown version")
        .to_string()
}
