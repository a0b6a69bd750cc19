use ffopt::engine::{JobOutcome, JobRunner, PresetStore, RunnerEvent};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

pub const SOFTWARE_JSON: &str = r#"{
    "Encoder": "libx264",
    "CommonParams": ["-preset", "slow", "-crf", "20"]
}"#;

pub const HARDWARE_JSON: &str = r#"{
    "Encoder": "h264_nvenc",
    "CommonParams": ["-preset", "p6", "-cq", "21"]
}"#;

pub fn store() -> PresetStore {
    PresetStore::from_documents(SOFTWARE_JSON, HARDWARE_JSON).unwrap()
}

/// Write both preset documents into `dir`
pub fn write_presets(dir: &Path, software: &str, hardware: &str) {
    fs::write(dir.join("software-config.json"), software).unwrap();
    fs::write(dir.join("hardware-config.json"), hardware).unwrap();
}

/// Everything one run produced
#[derive(Debug, Default)]
pub struct Collected {
    pub lines: Vec<String>,
    pub outcomes: Vec<JobOutcome>,
}

/// Poll the runner the way the UI does until it stops running
pub fn drain_runner(runner: &mut JobRunner) -> Collected {
    let deadline = Instant::now() + Duration::from_secs(20);
    let mut collected = Collected::default();

    loop {
        for event in runner.try_events(64) {
            match event {
                RunnerEvent::Line(line) => collected.lines.push(line),
                RunnerEvent::Completed(outcome) => collected.outcomes.push(outcome),
            }
        }
        if !runner.is_running() {
            break;
        }
        assert!(Instant::now() < deadline, "runner did not finish in time");
        std::thread::sleep(Duration::from_millis(5));
    }

    // Nothing may arrive after completion
    assert!(runner.try_events(64).is_empty());
    collected
}
