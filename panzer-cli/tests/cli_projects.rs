//! End-to-end CLI tests: every command runs inside an isolated working
//! directory so `./Cache` and `./Editor` never leak between tests.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn panzer_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("panzer"));
    cmd.current_dir(cwd).env("NO_COLOR", "1").env("RUST_LOG", "warn");
    cmd
}

fn new_project(cwd: &TempDir, location: &Path, name: &str) {
    panzer_cmd(cwd.path())
        .args(["new", name, "--location"])
        .arg(location)
        .assert()
        .success()
        .stdout(contains("Configuration completed!"));
}

#[test]
fn list_on_empty_registry() {
    let cwd = TempDir::new().expect("cwd");
    panzer_cmd(cwd.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No projects registered."));
    assert!(cwd.path().join("Cache").is_dir(), "list creates the cache dir");
}

#[test]
fn new_then_list_json() {
    let cwd = TempDir::new().expect("cwd");
    let location = TempDir::new().expect("location");
    new_project(&cwd, location.path(), "Demo");

    let root = location.path().join("Demo");
    assert!(root.join("projectConfig.json").is_file());
    assert!(root.join("Imported").join("Textures").is_dir());

    let output = panzer_cmd(cwd.path())
        .args(["list", "--json"])
        .output()
        .expect("run list");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let projects = value["projects"].as_array().expect("projects array");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["name"], "Demo");
    assert_eq!(projects[0]["fullpath"], root.display().to_string());
    assert!(projects[0]["creationDate"].is_string());
}

#[test]
fn new_defaults_to_current_directory_without_dot_in_path() {
    let cwd = TempDir::new().expect("cwd");
    panzer_cmd(cwd.path())
        .args(["new", "Demo"])
        .assert()
        .success();

    let output = panzer_cmd(cwd.path())
        .args(["list", "--json"])
        .output()
        .expect("run list");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let stored = value["projects"][0]["fullpath"].as_str().expect("fullpath");
    // the child resolves `.` through getcwd, which reports the physical path
    let expected = cwd.path().canonicalize().expect("canonical cwd").join("Demo");
    assert_eq!(stored, expected.display().to_string());
    assert!(!stored.contains("/./"), "stored: {stored}");
}

#[test]
fn new_rejects_existing_directory() {
    let cwd = TempDir::new().expect("cwd");
    let location = TempDir::new().expect("location");
    fs::create_dir(location.path().join("Demo")).expect("mkdir");

    panzer_cmd(cwd.path())
        .args(["new", "Demo", "--location"])
        .arg(location.path())
        .assert()
        .failure()
        .stderr(contains("The directory already exists"));
}

#[test]
fn new_rejects_invalid_name() {
    let cwd = TempDir::new().expect("cwd");
    panzer_cmd(cwd.path())
        .args(["new", "my game"])
        .assert()
        .failure()
        .stderr(contains("Name can't contain special characters or whitespace."));
}

#[test]
fn new_rejects_missing_location() {
    let cwd = TempDir::new().expect("cwd");
    panzer_cmd(cwd.path())
        .args(["new", "Demo", "--location", "does-not-exist"])
        .assert()
        .failure()
        .stderr(contains("This location isn't valid"));
}

#[test]
fn delete_with_yes_removes_everything() {
    let cwd = TempDir::new().expect("cwd");
    let location = TempDir::new().expect("location");
    new_project(&cwd, location.path(), "Demo");

    panzer_cmd(cwd.path())
        .args(["delete", "Demo", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted 'Demo'"));

    assert!(!location.path().join("Demo").exists());
    panzer_cmd(cwd.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No projects registered."));
}

#[test]
fn delete_declined_keeps_project() {
    let cwd = TempDir::new().expect("cwd");
    let location = TempDir::new().expect("location");
    new_project(&cwd, location.path(), "Demo");

    assert_cmd::Command::from_std(panzer_cmd(cwd.path()))
        .args(["delete", "Demo"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Aborted."));
    assert!(location.path().join("Demo").is_dir());
}

#[test]
fn open_unknown_project_fails() {
    let cwd = TempDir::new().expect("cwd");
    panzer_cmd(cwd.path())
        .args(["open", "Ghost"])
        .assert()
        .failure()
        .stderr(contains("no project named 'Ghost'"));
}

#[test]
fn open_without_editor_reports_spawn_failure() {
    let cwd = TempDir::new().expect("cwd");
    let location = TempDir::new().expect("location");
    new_project(&cwd, location.path(), "Demo");

    panzer_cmd(cwd.path())
        .args(["open", "Demo", "--timeout", "10"])
        .assert()
        .failure()
        .stderr(contains("failed to spawn editor"));
}

#[cfg(unix)]
#[test]
fn open_reports_invalid_arguments_exit() {
    use std::os::unix::fs::PermissionsExt;

    let cwd = TempDir::new().expect("cwd");
    let location = TempDir::new().expect("location");
    new_project(&cwd, location.path(), "Demo");

    let editor_dir = cwd.path().join("Editor");
    fs::create_dir_all(&editor_dir).expect("mkdir");
    let exe = editor_dir.join("zEngineEditor");
    fs::write(&exe, "#!/bin/sh\nexit 254\n").expect("write script");
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).expect("chmod");

    panzer_cmd(cwd.path())
        .args(["open", "Demo", "--timeout", "20"])
        .assert()
        .failure()
        .stderr(contains("Failed to start the engine, invalid args"));
}

#[test]
fn settings_file_overrides_cache_dir() {
    let cwd = TempDir::new().expect("cwd");
    let location = TempDir::new().expect("location");
    fs::write(cwd.path().join("panzer.yaml"), "cache_dir: ./Registry\n").expect("write");
    new_project(&cwd, location.path(), "Demo");

    assert!(cwd.path().join("Registry").is_dir());
    assert!(!cwd.path().join("Cache").exists());
}
