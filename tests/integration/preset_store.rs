// Loading presets from disk

use ffopt::engine::presets::{default_document, write_defaults};
use ffopt::engine::{ConfigError, PresetStore, ProfileKind};
use tempfile::TempDir;

use crate::common::helpers::*;

#[test]
fn test_load_both_profiles_from_dir() {
    let dir = TempDir::new().unwrap();
    write_presets(dir.path(), SOFTWARE_JSON, HARDWARE_JSON);

    let store = PresetStore::load(dir.path()).unwrap();
    assert_eq!(store.dir(), dir.path());

    let sw = store.get(ProfileKind::Software).unwrap();
    assert_eq!(sw.encoder, "libx264");
    assert_eq!(sw.common_params, vec!["-preset", "slow", "-crf", "20"]);

    let hw = store.get(ProfileKind::Hardware).unwrap();
    assert_eq!(hw.encoder, "h264_nvenc");
}

#[test]
fn test_missing_hardware_file_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("software-config.json"), SOFTWARE_JSON).unwrap();

    let err = PresetStore::load(dir.path()).unwrap_err();
    match err {
        ConfigError::MissingFile { path } => {
            assert_eq!(path, dir.path().join("hardware-config.json"));
        }
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn test_malformed_document_names_the_file() {
    let dir = TempDir::new().unwrap();
    write_presets(dir.path(), "{ not json", HARDWARE_JSON);

    let err = PresetStore::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::MalformedDocument { .. }));
    assert!(err.to_string().contains("software-config.json"));
}

#[test]
fn test_missing_encoder_key_loads_but_lookup_fails() {
    let dir = TempDir::new().unwrap();
    write_presets(dir.path(), SOFTWARE_JSON, r#"{ "CommonParams": ["-cq", "21"] }"#);

    let store = PresetStore::load(dir.path()).unwrap();
    assert!(store.get(ProfileKind::Software).is_ok());
    assert!(matches!(
        store.get(ProfileKind::Hardware),
        Err(ConfigError::ProfileNotFound(ProfileKind::Hardware))
    ));
}

#[test]
fn test_written_defaults_load_back() {
    let dir = TempDir::new().unwrap();
    let presets = dir.path().join("presets");

    let written = write_defaults(&presets, false).unwrap();
    assert_eq!(written.len(), 2);

    let store = PresetStore::load(&presets).unwrap();
    for kind in ProfileKind::ALL {
        assert_eq!(store.document(kind), &default_document(kind));
    }
}

#[test]
fn test_write_defaults_keeps_user_edits() {
    let dir = TempDir::new().unwrap();
    write_presets(dir.path(), SOFTWARE_JSON, HARDWARE_JSON);

    assert!(write_defaults(dir.path(), false).unwrap().is_empty());
    let store = PresetStore::load(dir.path()).unwrap();
    assert_eq!(
        store.get(ProfileKind::Software).unwrap().common_params,
        vec!["-preset", "slow", "-crf", "20"]
    );

    assert_eq!(write_defaults(dir.path(), true).unwrap().len(), 2);
    let store = PresetStore::load(dir.path()).unwrap();
    assert_eq!(
        store.document(ProfileKind::Software),
        &default_document(ProfileKind::Software)
    );
}
