#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ppd() -> Command {
    cargo_bin_cmd!("punchpad")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchpad.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and register one employee with PIN 1234
pub fn init_db_with_employee(db_path: &str) {
    ppd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    ppd()
        .args([
            "--db", db_path, "employee", "add", "--name", "Alice", "--rate", "18.5", "--pin",
            "1234",
        ])
        .assert()
        .success();
}

/// Submit one kiosk PIN at a fixed instant
pub fn kiosk_pin(db_path: &str, source: &str, pin: &str, at: &str) -> assert_cmd::assert::Assert {
    ppd()
        .args([
            "--db", db_path, "kiosk", "pin", "--source", source, "--pin", pin, "--at", at,
        ])
        .assert()
}
