//! CLI-level tests for argument handling and startup failures.

use assert_cmd::Command;
use predicates::prelude::*;
use std::net::TcpListener;

#[test]
fn test_help_lists_serve() {
    Command::cargo_bin("vitrine")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help_mentions_port_and_host() {
    Command::cargo_bin("vitrine")
        .unwrap()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--host"));
}

#[test]
fn test_missing_root_is_fatal() {
    Command::cargo_bin("vitrine")
        .unwrap()
        .args(["serve", "definitely/not/a/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_busy_port_is_fatal() {
    let temp = tempfile::TempDir::new().unwrap();
    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let port = listener.local_addr().unwrap().port();

    Command::cargo_bin("vitrine")
        .unwrap()
        .args(["serve", temp.path().to_str().unwrap()])
        .args(["--port", &port.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("port"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    Command::cargo_bin("vitrine")
        .unwrap()
        .args(["--verbose", "--quiet", "serve"])
        .assert()
        .failure();
}
