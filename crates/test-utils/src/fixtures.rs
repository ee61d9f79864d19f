#![allow(dead_code)]

//! On-disk fixtures for lifecycle tests that spawn real processes.

use std::path::{Path, PathBuf};

/// Shell script that exits immediately with status 0.
pub const EXIT_OK_SCRIPT: &str = "#!/bin/sh\nexit 0\n";

/// Shell script that stays alive long enough for a test to terminate it.
pub const SLEEP_SCRIPT: &str = "#!/bin/sh\nsleep 30\n";

/// Write an executable shell script named `name` into `dir` and return its
/// path.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, body).expect("failed to write script fixture");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to chmod script fixture");
    path
}
