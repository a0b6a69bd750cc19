// Persisted settings and path resolution

use ffopt::config::Config;
use ffopt::engine::ProfileKind;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_missing_settings_file_is_created_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ffopt").join("config.toml");

    let config = Config::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.console.max_lines, 5000);
    assert_eq!(config.initial_profile(), ProfileKind::Software);
}

#[test]
fn test_last_used_profile_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.defaults.last_used_profile = Some(ProfileKind::Hardware);
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.initial_profile(), ProfileKind::Hardware);
}

#[test]
fn test_partial_settings_fill_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[encoder]\nffmpeg_path = \"/opt/ffmpeg/bin/ffmpeg\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(
        config.ffmpeg_path(None),
        PathBuf::from("/opt/ffmpeg/bin/ffmpeg")
    );
    assert_eq!(config.console.max_lines, 5000);
}

#[test]
fn test_invalid_settings_are_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[console]\nmax_lines = \"lots\"\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_command_line_overrides_win() {
    let mut config = Config::default();
    config.encoder.ffmpeg_path = Some(PathBuf::from("/from/settings"));
    config.presets.dir = Some(PathBuf::from("/settings/presets"));

    assert_eq!(
        config.ffmpeg_path(Some(Path::new("/from/cli"))),
        PathBuf::from("/from/cli")
    );
    assert_eq!(
        config.presets_dir(Some(Path::new("/cli/presets"))).unwrap(),
        PathBuf::from("/cli/presets")
    );
    assert_eq!(
        config.presets_dir(None).unwrap(),
        PathBuf::from("/settings/presets")
    );
}
