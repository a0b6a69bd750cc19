// Running the ffopt binary's non-interactive subcommands

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

use crate::common::fake_tool::process_lock;
use crate::common::helpers::*;

/// Run ffopt with settings, logs and working directory confined to `home`
fn ffopt(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ffopt"))
        .args(args)
        .current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("FFOPT_LOG")
        .output()
        .expect("failed to run ffopt")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_dry_run_prints_command() {
    let _guard = process_lock();
    let home = TempDir::new().unwrap();
    let presets = home.path().join("presets");
    std::fs::create_dir(&presets).unwrap();
    write_presets(&presets, SOFTWARE_JSON, HARDWARE_JSON);

    let output = ffopt(
        home.path(),
        &[
            "dry-run",
            "clip.mp4",
            "--presets-dir",
            presets.to_str().unwrap(),
            "--ffmpeg",
            "/opt/ffmpeg",
            "--profile",
            "hardware",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let printed = stdout(&output);
    let words = shlex::split(printed.trim()).unwrap();
    assert_eq!(
        words,
        vec![
            "/opt/ffmpeg",
            "-i",
            "clip.mp4",
            "-c:v",
            "h264_nvenc",
            "-preset",
            "p6",
            "-cq",
            "21",
            "clip_optimized.mp4",
        ]
    );
    assert!(home.path().join("ffopt.log").exists(), "log file written");
}

#[test]
fn test_missing_presets_fail_with_hint() {
    let _guard = process_lock();
    let home = TempDir::new().unwrap();
    let empty = home.path().join("nothing-here");

    let output = ffopt(
        home.path(),
        &["dry-run", "clip.mp4", "--presets-dir", empty.to_str().unwrap()],
    );
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("software-config.json"), "stderr: {stderr}");
    assert!(stderr.contains("init-config"));
}

#[test]
fn test_init_config_writes_presets_and_settings() {
    let _guard = process_lock();
    let home = TempDir::new().unwrap();
    let presets = home.path().join("presets");

    let output = ffopt(
        home.path(),
        &["init-config", "--presets-dir", presets.to_str().unwrap()],
    );
    assert!(output.status.success());
    assert!(presets.join("software-config.json").is_file());
    assert!(presets.join("hardware-config.json").is_file());
    assert!(
        home.path()
            .join(".config")
            .join("ffopt")
            .join("config.toml")
            .is_file()
    );

    // Second run keeps the existing files
    let again = ffopt(
        home.path(),
        &["init-config", "--presets-dir", presets.to_str().unwrap()],
    );
    assert!(again.status.success());
    assert!(stdout(&again).contains("already exist"));
}

#[cfg(unix)]
#[test]
fn test_encode_streams_output_and_exit_code() {
    use crate::common::fake_tool::counting_tool;

    let _guard = process_lock();
    let home = TempDir::new().unwrap();
    write_presets(home.path(), SOFTWARE_JSON, HARDWARE_JSON);
    let tool = counting_tool(home.path(), 4, 3);

    let output = ffopt(
        home.path(),
        &[
            "encode",
            "clip.mp4",
            "--presets-dir",
            home.path().to_str().unwrap(),
            "--ffmpeg",
            tool.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(3));

    let printed = stdout(&output);
    assert!(printed.contains("Output file: clip_optimized.mp4"));
    assert!(printed.contains("Encoder: libx264"));
    let line_1 = printed.find("line 1").unwrap();
    let line_4 = printed.find("line 4").unwrap();
    assert!(line_1 < line_4);
    assert!(printed.contains("Video optimization failed! (exit code 3)"));
}

#[cfg(unix)]
#[test]
fn test_check_ffmpeg_reports_version() {
    use crate::common::fake_tool::write_tool;

    let _guard = process_lock();
    let home = TempDir::new().unwrap();
    let tool = write_tool(home.path(), "fake-ffmpeg", "echo 'ffmpeg version 7.1-test'");

    let output = ffopt(home.path(), &["check-ffmpeg", "--ffmpeg", tool.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("ffmpeg version 7.1-test"));
}
