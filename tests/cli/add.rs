//! Tests for `keypick add` argument checks.
//!
//! These fail before any vault is touched, so they run without one.

use crate::support::*;

#[test]
fn test_add_rejects_invalid_label() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["--kind", "password", "add", "a|b"])
        .write_stdin("secret\n")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid label");
}

#[test]
fn test_add_rejects_padded_label() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["--kind", "password", "add", " email"])
        .write_stdin("secret\n")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid label");
}

#[test]
fn test_add_rejects_malformed_principal() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["add", "prod", "--principal", "alice"])
        .write_stdin("secret\n")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid principal");
}

#[test]
fn test_add_password_with_principal_fails() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["--kind", "password", "add", "email", "-p", "alice@host"])
        .write_stdin("secret\n")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "no principal");
}

#[test]
fn test_piped_ssh_add_needs_principal() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["add", "prod"])
        .write_stdin("secret\n")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "--principal");
}

#[test]
fn test_add_rejects_option_like_principal() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["add", "prod", "--principal=-oProxyCommand=touch@host"])
        .write_stdin("secret\n")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid principal");
}
