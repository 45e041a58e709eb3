use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

// These run without a terminal, so only paths that fail or exit before the
// TUI starts are exercised here.

fn typetest(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("typetest").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[test]
fn help_lists_options() {
    let home = tempdir().unwrap();
    typetest(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--difficulty"))
        .stdout(predicate::str::contains("--words"));
}

#[test]
fn missing_word_file_is_reported() {
    let home = tempdir().unwrap();
    typetest(home.path())
        .args(["--words", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file"));
}

#[test]
fn zero_time_limit_is_rejected() {
    let home = tempdir().unwrap();
    typetest(home.path())
        .args(["--secs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("time_limit_secs"));
}

#[test]
fn unknown_difficulty_is_rejected() {
    let home = tempdir().unwrap();
    typetest(home.path())
        .args(["--difficulty", "impossible"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("impossible"));
}

#[test]
fn requires_a_terminal_for_output() {
    let home = tempdir().unwrap();
    let words = home.path().join("words.txt");
    std::fs::write(&words, "cat\ndog\n").unwrap();

    typetest(home.path())
        .args(["--words", words.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdout must be a tty"));
}
