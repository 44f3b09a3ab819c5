//! CLI integration tests
//!
//! Tests the storfleet CLI using assert_cmd. No test here reaches a real
//! node: descriptor validation failures abort before any network activity,
//! and the connectivity test points at loopback with a short timeout.

use assert_cmd::Command;
use predicates::prelude::*;

fn storfleet() -> Command {
    Command::cargo_bin("storfleet")
        .expect("Failed to locate storfleet binary - ensure it's built before running tests")
}

#[test]
fn test_cli_help() {
    storfleet()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("storfleet"))
        .stdout(predicate::str::contains("fleet of nodes"));
}

#[test]
fn test_cli_version() {
    storfleet()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("storfleet"));
}

#[test]
fn test_cli_requires_cluster_and_nodes() {
    storfleet()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));

    // A cluster address alone is not enough
    storfleet()
        .arg("10.0.0.1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_malformed_descriptor_exits_one() {
    storfleet()
        .args(["10.0.0.1", "root10.0.0.2pw1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Malformed node descriptor"));
}

#[test]
fn test_conflicting_credentials_exit_one() {
    storfleet()
        .args(["10.0.0.1", "alice,10.0.0.5,secret,/key"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "both a password and a keyfile",
        ));
}

#[test]
fn test_missing_credentials_exit_one() {
    storfleet()
        .args(["10.0.0.1", "alice,10.0.0.5,,"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "neither a password nor a keyfile",
        ));
}

#[test]
fn test_bad_token_aborts_before_good_ones_are_contacted() {
    // Node 2's typo must abort the run before node 1 is touched. The good
    // descriptor points at a routable address; if it were contacted the run
    // would stall on the connect rather than fail immediately.
    storfleet()
        .args([
            "10.0.0.1",
            "root,127.0.0.1,pw1",
            "root-no-commas",
            "root,127.0.0.1,pw3",
        ])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Malformed node descriptor"));
}

#[test]
fn test_summary_table_prints_before_remote_failure() {
    // Valid descriptors targeting loopback: the summary table must appear
    // even though no install can complete. Whatever answers on port 22 (or
    // nothing at all), the run fails and exits 1.
    storfleet()
        .args([
            "10.0.0.1",
            "storfleet-nobody,127.0.0.1,pw1",
            "storfleet-nobody,127.0.0.1,,/nonexistent/keyfile",
            "--connect-timeout",
            "5",
        ])
        .timeout(std::time::Duration::from_secs(60))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Setting up the following nodes"))
        .stdout(predicate::str::contains("USERNAME"))
        .stdout(predicate::str::contains("KEYFILE"))
        .stdout(predicate::str::contains("127.0.0.1"));
}
