use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_mount_flag_and_config() {
    cargo_bin_cmd!("vcmd")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--mount"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("vcmd")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    cargo_bin_cmd!("vcmd")
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus"));
}
