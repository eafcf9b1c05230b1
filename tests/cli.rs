//! Integration tests for top-level CLI behavior.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};

fn run_cronwrap(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_cronwrap");
    Command::new(bin).args(args).output().expect("failed to run cronwrap binary")
}

fn run_cronwrap_with_mailer(args: &[&str], mailer: &Path) -> Output {
    let bin = env!("CARGO_BIN_EXE_cronwrap");
    Command::new(bin)
        .args(args)
        .env("CRONWRAP_MAILER", mailer)
        .output()
        .expect("failed to run cronwrap binary")
}

/// Writes a fake mailer that appends its argv and stdin next to itself.
fn write_fake_mailer(dir: &Path) -> PathBuf {
    let path = dir.join("fakemail");
    let script = "#!/bin/sh\n\
                  dir=\"$(dirname \"$0\")\"\n\
                  printf '%s\\n' \"$@\" >> \"$dir/argv\"\n\
                  cat >> \"$dir/body\"\n";
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn successful_run_is_quiet_and_exits_zero() {
    let output = run_cronwrap(&["-c", "true"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn exit_code_mirrors_the_wrapped_command() {
    let output = run_cronwrap(&["-c", "exit 7"]);
    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn failure_report_falls_back_to_the_console() {
    let output = run_cronwrap(&["-c", "echo boom; exit 2"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("CRONWRAP DETECTED A FAILURE ON FOLLOWING COMMAND:"));
    assert!(stdout.contains("echo boom; exit 2"));
    assert!(stdout.contains("RETURN CODE WAS:"));
    assert!(stdout.contains("boom"));
}

#[test]
fn verbose_success_prints_a_report() {
    let output = run_cronwrap(&["-c", "echo fine", "-v"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("CRONWRAP RAN COMMAND SUCCESSFULLY:"));
    assert!(stdout.contains("fine"));
}

#[test]
fn slow_command_finishes_before_the_timeout_is_reported() {
    let started = Instant::now();
    let output = run_cronwrap(&["-c", "sleep 2", "-t", "1s"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    // The wrapper waits out the full sleep; the deadline does not kill it.
    assert!(started.elapsed() >= Duration::from_secs(2));
    assert!(output.status.success());
    assert!(stdout.contains("CRONWRAP DETECTED A TIMEOUT ON FOLLOWING COMMAND:"));
}

#[test]
fn malformed_timeout_fails_before_running_anything() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let cmd = format!("touch {}", marker.display());

    let output = run_cronwrap(&["-c", &cmd, "-t", "9q"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("\"9q\""));
    assert!(!marker.exists());
}

#[test]
fn help_lists_every_flag() {
    let output = run_cronwrap(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("--cmd"));
    assert!(stdout.contains("--emails"));
    assert!(stdout.contains("--time"));
    assert!(stdout.contains("--verbose"));
}

#[test]
fn unknown_flag_exits_with_an_error() {
    let output = run_cronwrap(&["--frobnicate"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unexpected argument"));
}

#[test]
fn bare_invocation_sends_nothing_and_exits_zero() {
    let output = run_cronwrap(&[]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn failure_mail_reaches_the_configured_mailer() {
    let dir = tempfile::tempdir().unwrap();
    let mailer = write_fake_mailer(dir.path());

    let output =
        run_cronwrap_with_mailer(&["-c", "echo broken; exit 5", "-e", "ops@example.com"], &mailer);

    assert_eq!(output.status.code(), Some(5));
    // Mailed reports do not echo to the console.
    assert!(output.stdout.is_empty());

    let argv = fs::read_to_string(dir.path().join("argv")).unwrap();
    assert!(argv.contains("-s"));
    assert!(argv.contains("cronwrap detected a failure!"));
    assert!(argv.contains("ops@example.com"));

    let body = fs::read_to_string(dir.path().join("body")).unwrap();
    assert!(body.contains("CRONWRAP DETECTED A FAILURE ON FOLLOWING COMMAND:"));
    assert!(body.contains("broken"));
}

#[test]
fn test_mail_goes_to_every_recipient() {
    let dir = tempfile::tempdir().unwrap();
    let mailer = write_fake_mailer(dir.path());

    let output = run_cronwrap_with_mailer(&["-e", "a@example.com, b@example.com"], &mailer);

    assert!(output.status.success());
    let argv = fs::read_to_string(dir.path().join("argv")).unwrap();
    assert!(argv.contains("a@example.com"));
    assert!(argv.contains("b@example.com"));
    assert!(argv.contains("cronwrap test mail"));

    let body = fs::read_to_string(dir.path().join("body")).unwrap();
    assert!(body.contains("test notification"));
}

#[test]
fn quiet_success_with_recipients_sends_no_mail() {
    let dir = tempfile::tempdir().unwrap();
    let mailer = write_fake_mailer(dir.path());

    let output = run_cronwrap_with_mailer(&["-c", "true", "-e", "ops@example.com"], &mailer);

    assert!(output.status.success());
    assert!(!dir.path().join("argv").exists());
}

#[test]
fn broken_mailer_does_not_change_the_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("failmail");
    fs::write(&path, "#!/bin/sh\ncat > /dev/null\nexit 9\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

    let output = run_cronwrap_with_mailer(&["-c", "exit 4", "-e", "ops@example.com"], &path);

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Warning"));
}
