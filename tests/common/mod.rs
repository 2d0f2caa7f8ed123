//! Shared helpers for camvirt integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};

/// Runs the camvirt binary with the given arguments and captures its output.
pub fn run_camvirt(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_camvirt"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run camvirt")
}

/// A configuration document that resolves against the built-in site catalog.
pub fn site_document() -> Value {
    json!({
        "daemon": "camvirt_daemon",
        "log_name": "camvirtd",
        "control_machines": ["ops_server", "observer_desktop"],
        "initialize_timeout": 60,
        "shutdown_timeout": 30,
        "domains": {
            "east": {"cam_east": "dome_east_camera_daemon"},
            "west": {"cam_west": "dome_west_camera_daemon"}
        }
    })
}

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}
