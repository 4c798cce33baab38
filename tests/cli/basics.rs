//! Help, version and completions.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();
    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("rm"))
        .stdout(predicate::str::contains("--kind"));
}

#[test]
fn test_version() {
    let t = Test::new();
    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completions_bash() {
    let t = Test::new();
    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keypick"));
}

#[test]
fn test_completions_zsh_named_after_binary() {
    let t = Test::new();
    t.cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef keypick"));
}

#[test]
fn test_unknown_kind_is_rejected() {
    let t = Test::new();
    t.cmd()
        .args(["--kind", "token", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
