//! Shared fixtures for integration tests.

use std::io::Write;

use instance_ingress::{EnvironmentMode, InstanceRef};
use tempfile::NamedTempFile;

/// Write `contents` to a temporary TOML file that lives as long as the handle.
pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn instance(uid: &str, mode: EnvironmentMode) -> InstanceRef {
    InstanceRef {
        name: "ubuntu-desktop".into(),
        namespace: "tenant-mrossi".into(),
        uid: uid.into(),
        mode,
    }
}
