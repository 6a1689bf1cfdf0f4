//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with a throwaway config path and verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(config: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_cupmate"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("CUPMATE_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn config_in(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("config.toml")
}

#[test]
fn test_ring_text() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&config_in(&dir), &["ring", "--water", "500", "--coffee", "300"]);
    assert_eq!(code, 0, "ring failed");
    assert!(stdout.starts_with("800 / 3000 ml"));
    assert!(stdout.contains("water"));
}

#[test]
fn test_ring_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        &config_in(&dir),
        &["ring", "--water", "500", "--coffee", "300", "--json"],
    );
    assert_eq!(code, 0, "ring --json failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["total_ml"], 800.0);
    assert_eq!(parsed["segments"].as_array().unwrap().len(), 4);
}

#[test]
fn test_ring_rejects_negative_amount() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(&config_in(&dir), &["ring", "--water=-5"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("invalid amount"));
}

#[test]
fn test_remind_lists_today() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        &config_in(&dir),
        &[
            "remind", "--start", "09:00", "--end", "12:00", "--hours", "1", "--minutes", "30",
            "--now", "08:00", "--date", "2026-10-19",
        ],
    );
    assert_eq!(code, 0, "remind failed");
    let times: Vec<&str> = stdout.lines().skip(1).map(str::trim).collect();
    assert_eq!(times, vec!["09:00", "10:30", "12:00"]);
}

#[test]
fn test_remind_weekend_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        &config_in(&dir),
        &[
            "remind", "--start", "09:00", "--end", "12:00", "--now", "08:00", "--date",
            "2026-10-24",
        ],
    );
    assert_eq!(code, 0);
    assert!(stdout.starts_with("No reminders today"));
}

#[test]
fn test_remind_zero_interval_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        &config_in(&dir),
        &["remind", "--start", "09:00", "--end", "12:00", "--hours", "0", "--minutes", "0"],
    );
    assert_ne!(code, 0);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_session_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_cupmate"))
        .arg("--config")
        .arg(config_in(&dir))
        .arg("session")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn session");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"add water 500\nsub water 800\nadd soup 250\nring\nquit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "+500 ml water (total 500 ml)");
    assert_eq!(lines[1], "-800 ml water (total 0 ml)");
    assert_eq!(lines[2], "+250 ml soup (total 250 ml)");
    assert_eq!(lines[3], "250 / 3000 ml");
}

#[test]
fn test_config_init_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_in(&dir);

    let (code, _, _) = run_cli(&path, &["config", "init"]);
    assert_eq!(code, 0, "config init failed");
    assert!(path.exists());

    let (code, _, stderr) = run_cli(&path, &["config", "init"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--force"));

    let (code, stdout, _) = run_cli(&path, &["config", "get", "reminders.sound"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "default");

    let (code, _, _) = run_cli(&path, &["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_rejects_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = config_in(&dir);
    std::fs::write(&path, "[reminders.interval]\nhours = 0\nminutes = 0\n").unwrap();

    let (code, _, stderr) = run_cli(&path, &["config", "list"]);
    assert_ne!(code, 0);
    assert!(stderr.starts_with("error:"));
}
