//! Integration tests for the videre CLI.
//!
//! Argument parsing, help text, and version output.

use assert_cmd::Command;
use predicates::prelude::*;

/// Test that the binary without a subcommand shows usage and fails.
#[test]
fn test_cli_no_arguments() {
    let mut cmd = Command::cargo_bin("videre").expect("Failed to find videre binary");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

/// Test that the --version flag displays version information.
#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::cargo_bin("videre").expect("Failed to find videre binary");

    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("videre"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that the --help flag lists both commands.
#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::cargo_bin("videre").expect("Failed to find videre binary");

    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Launch Videre database viewer processes"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("validate"));
}

/// Test that start's help documents its flags.
#[test]
fn test_start_help() {
    let mut cmd = Command::cargo_bin("videre").expect("Failed to find videre binary");

    cmd.args(["start", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--filter"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--dir"));
}

/// Test that an unknown subcommand is a clap usage error.
#[test]
fn test_unknown_subcommand() {
    let mut cmd = Command::cargo_bin("videre").expect("Failed to find videre binary");

    cmd.arg("launch");

    cmd.assert().failure().code(2);
}

/// Test that --filter requires a value.
#[test]
fn test_filter_requires_value() {
    let mut cmd = Command::cargo_bin("videre").expect("Failed to find videre binary");

    cmd.args(["start", "--filter"]);

    cmd.assert().failure().code(2);
}
