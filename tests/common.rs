#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sg() -> Command {
    cargo_bin_cmd!("shiftguard")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftguard.sqlite", name));
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

/// Initialize the DB (schema + seed roster) in test mode.
pub fn init_db(db_path: &str) {
    sg().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Toggle `id` at the given local time.
pub fn toggle_at(db_path: &str, id: &str, now: &str) {
    sg().args(["--db", db_path, "--test", "--now", now, "toggle", id])
        .assert()
        .success();
}
