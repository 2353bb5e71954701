use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn notegit() -> Command {
    Command::cargo_bin("notegit").expect("notegit binary")
}

#[test]
fn config_init_creates_file_then_reports_existing() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("config.yaml");

    notegit()
        .args(["config", "init", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));
    assert!(config.exists());

    notegit()
        .args(["config", "init", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exist"));
}

#[test]
fn config_show_prints_settings_fields() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("config.yaml");
    std::fs::write(
        &config,
        "branch: main\nlocal_path: /tmp/notes\nsync_interval_minutes: 7\n",
    )
    .expect("write config");

    notegit()
        .args(["config", "show", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("branch: main"))
        .stdout(predicate::str::contains("sync_interval_minutes: 7"));
}

#[test]
fn config_show_fails_on_missing_file() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("nope.yaml");

    notegit()
        .args(["config", "show", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("settings not found"));
}

#[test]
fn run_with_incomplete_settings_skips_without_touching_anything() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("config.yaml");
    // branch and local_path deliberately unset
    std::fs::write(&config, "enable_notifications: false\n").expect("write config");

    notegit()
        .args(["run", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"));
}
