//! End-to-end tests for the `dpd` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn dpd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dpd").unwrap();
    cmd.current_dir(dir)
        .arg("--no-color")
        .env_remove("ANDROID_HOME")
        .env_remove("ANDROID_SDK_ROOT")
        .env_remove("RUST_LOG");
    cmd
}

#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Project with a fake Gradle wrapper that logs its arguments and fails `test`
/// when `FAIL_TASK` matches, plus a fake `java` wired in through `.dpd.toml`
#[cfg(unix)]
fn fake_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_script(
        &dir.path().join("gradlew"),
        r#"echo "$@" >> "$(dirname "$0")/gradle.log"
if [ "$1" = "$FAIL_TASK" ]; then exit 1; fi
exit 0"#,
    );
    let java = dir.path().join("java");
    write_script(&java, r#"echo 'openjdk version "17.0.9"' >&2"#);
    std::fs::write(
        dir.path().join(".dpd.toml"),
        format!("[environment]\njava = \"{}\"\n", java.display()),
    )
    .unwrap();
    dir
}

fn gradle_log(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("gradle.log"))
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn help_lists_commands_and_examples() {
    let dir = tempfile::tempdir().unwrap();
    dpd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("dpd all"));
}

#[test]
fn unknown_command_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    dpd(dir.path())
        .arg("deploy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn missing_command_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    dpd(dir.path()).assert().code(2);
}

#[test]
fn check_without_sdk_fails() {
    let dir = tempfile::tempdir().unwrap();
    dpd(dir.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Environment Issues Found:"))
        .stderr(predicate::str::contains(
            "ANDROID_HOME or ANDROID_SDK_ROOT environment variable not set",
        ));
}

#[test]
fn check_with_missing_sdk_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    dpd(dir.path())
        .arg("check")
        .env("ANDROID_HOME", dir.path().join("no-sdk"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Android SDK path does not exist"));
}

#[test]
fn build_without_wrapper_fails() {
    let dir = tempfile::tempdir().unwrap();
    dpd(dir.path())
        .arg("build")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Building Debug APK..."))
        .stderr(predicate::str::contains("Gradle wrapper not found at"));
}

#[test]
fn broken_config_fails_before_running() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".dpd.toml"), "[gradle\n").unwrap();
    dpd(dir.path())
        .arg("clean")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TOML parse error"));
}

#[test]
fn empty_sdk_vars_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".dpd.toml"), "[environment]\nsdk_vars = []\n").unwrap();
    dpd(dir.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("environment.sdk_vars must name at least one variable"))
        .stderr(predicate::str::contains("Environment Issues Found:").not());
}

#[test]
fn failed_check_writes_no_log_noise() {
    let dir = tempfile::tempdir().unwrap();
    dpd(dir.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("WARN").not())
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[cfg(unix)]
#[test]
fn unknown_command_spawns_nothing() {
    let dir = fake_project();
    dpd(dir.path()).arg("bogus").assert().code(2);
    assert!(gradle_log(dir.path()).is_empty());
}

#[cfg(unix)]
#[test]
fn single_command_runs_one_task() {
    let dir = fake_project();
    dpd(dir.path())
        .arg("release")
        .assert()
        .success()
        .stdout(predicate::str::contains("Running: "))
        .stdout(predicate::str::contains("assembleRelease --no-daemon"));

    assert_eq!(gradle_log(dir.path()), vec!["assembleRelease --no-daemon"]);
}

#[cfg(unix)]
#[test]
fn single_command_failure_exits_one() {
    let dir = fake_project();
    dpd(dir.path()).arg("lint").env("FAIL_TASK", "lint").assert().code(1);
    assert_eq!(gradle_log(dir.path()), vec!["lint --no-daemon"]);
}

#[cfg(unix)]
#[test]
fn check_passes_with_sdk_and_java() {
    let dir = fake_project();
    dpd(dir.path())
        .arg("check")
        .env("ANDROID_HOME", dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Environment check passed!"));
    assert!(gradle_log(dir.path()).is_empty());
}

#[cfg(unix)]
#[test]
fn all_runs_every_step() {
    let dir = fake_project();
    dpd(dir.path())
        .arg("all")
        .env("ANDROID_HOME", dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Step: Checking environment"))
        .stdout(predicate::str::contains("All steps completed successfully!"))
        .stdout(predicate::str::contains(
            "Debug APK location: app/build/outputs/apk/debug/app-debug.apk",
        ));

    assert_eq!(
        gradle_log(dir.path()),
        vec![
            "clean --no-daemon",
            "test --no-daemon",
            "lint --no-daemon",
            "assembleDebug --no-daemon",
        ]
    );
}

#[cfg(unix)]
#[test]
fn all_stops_at_failing_tests() {
    let dir = fake_project();
    dpd(dir.path())
        .arg("all")
        .env("ANDROID_HOME", dir.path())
        .env("FAIL_TASK", "test")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed at: Running tests"))
        .stdout(predicate::str::contains("Step: Running lint").not());

    assert_eq!(
        gradle_log(dir.path()),
        vec!["clean --no-daemon", "test --no-daemon"]
    );
}

#[cfg(unix)]
#[test]
fn all_stops_at_environment_check() {
    let dir = fake_project();
    dpd(dir.path())
        .arg("all")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed at: Checking environment"));

    assert!(gradle_log(dir.path()).is_empty());
}

#[cfg(unix)]
#[test]
fn config_at_project_root_applies_in_subdirectory() {
    let dir = fake_project();
    let config = dir.path().join(".dpd.toml");
    let mut content = std::fs::read_to_string(&config).unwrap();
    content.push_str("[gradle]\nno_daemon = false\n");
    std::fs::write(&config, content).unwrap();
    let nested = dir.path().join("app/src");
    std::fs::create_dir_all(&nested).unwrap();

    dpd(&nested).arg("clean").assert().success();
    dpd(dir.path()).arg("clean").assert().success();

    assert_eq!(gradle_log(dir.path()), vec!["clean", "clean"]);
}

#[cfg(unix)]
#[test]
fn quiet_all_still_reports_artifact() {
    let dir = fake_project();
    dpd(dir.path())
        .args(["--quiet", "all"])
        .env("ANDROID_HOME", dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Debug APK location: app/build/outputs/apk/debug/app-debug.apk",
        ))
        .stdout(predicate::str::contains("Step: ").not());
}

#[cfg(unix)]
#[test]
fn quiet_hides_status_lines() {
    let dir = fake_project();
    dpd(dir.path())
        .args(["--quiet", "clean"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(gradle_log(dir.path()), vec!["clean --no-daemon"]);
}
