// Stand-in encoder executables for end-to-end runs
//
// A freshly written script can fail to exec with ETXTBSY while another test
// thread is forking, so every test that writes or spawns a tool holds
// PROCESS_LOCK for its whole duration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static PROCESS_LOCK: Mutex<()> = Mutex::new(());

pub fn process_lock() -> MutexGuard<'static, ()> {
    PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Write an executable `/bin/sh` script named `name` into `dir`
#[cfg(unix)]
pub fn write_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A tool that prints `lines` numbered lines, half on stderr, then exits with `code`
#[cfg(unix)]
pub fn counting_tool(dir: &Path, lines: usize, code: i32) -> PathBuf {
    let body = format!(
        r#"i=1
while [ $i -le {lines} ]; do
  if [ $((i % 2)) -eq 0 ]; then echo "line $i" >&2; else echo "line $i"; fi
  i=$((i + 1))
done
exit {code}"#
    );
    write_tool(dir, "fake-ffmpeg", &body)
}

/// A tool that echoes each argument on its own line
#[cfg(unix)]
pub fn echo_args_tool(dir: &Path) -> PathBuf {
    write_tool(dir, "fake-ffmpeg", r#"for arg in "$@"; do echo "arg=$arg"; done"#)
}
