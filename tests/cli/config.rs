//! Config file loading through the binary.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_missing_explicit_config_fails() {
    let t = Test::new();
    let missing = t.home.path().join("nope.toml");
    t.cmd()
        .arg("--config")
        .arg(&missing)
        .args(["add", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn test_unknown_config_field_fails() {
    let t = Test::new();
    let path = t.config("colour = \"blue\"\n");
    t.cmd()
        .arg("--config")
        .arg(&path)
        .args(["add", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_config_from_env() {
    let t = Test::new();
    let path = t.config("[connect]\nattempts = \"many\"\n");
    t.cmd()
        .env("KEYPICK_CONFIG", &path)
        .args(["add", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_valid_config_reaches_command() {
    let t = Test::new();
    let path = t.config("delete_default_yes = false\n\n[accounts]\npassword = \"work-passwords\"\n");
    // Loads fine, then fails on the label check.
    t.cmd()
        .arg("--config")
        .arg(&path)
        .args(["--kind", "password", "add", "a|b"])
        .write_stdin("x\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid label"));
}
