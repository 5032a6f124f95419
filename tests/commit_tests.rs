mod common;

use common::{gitrecipe, head_message, setup_test_repo, stage};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_non_interactive_commit_with_all_files() {
    let (dir, repo) = setup_test_repo();
    fs::write(dir.path().join("lib.rs"), "fn main() {}\n").unwrap();

    gitrecipe(dir.path())
        .args([
            "--non-interactive",
            "commit",
            "--type",
            "Fix",
            "-m",
            "handle \"quoted\" input",
            "--issues",
            "fix #12",
            "--all",
        ])
        .assert()
        .success();

    assert_eq!(
        head_message(&repo),
        "Fix: handle \"quoted\" input\n\nfix #12"
    );
    let tree = repo.head().unwrap().peel_to_tree().unwrap();
    assert!(tree.get_name("lib.rs").is_some());
}

#[test]
fn test_commit_is_the_default_command() {
    let (dir, repo) = setup_test_repo();
    fs::write(dir.path().join("notes.txt"), "notes\n").unwrap();
    stage(&repo, "notes.txt");

    gitrecipe(dir.path())
        .arg("--non-interactive")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--type is required"));

    gitrecipe(dir.path())
        .args(["--non-interactive", "commit", "--type", "Docs:", "-m", "add notes"])
        .assert()
        .success();
    assert_eq!(head_message(&repo), "Docs: add notes");
}

#[test]
fn test_long_subject_is_cropped_and_body_wrapped() {
    let (dir, repo) = setup_test_repo();
    fs::write(dir.path().join("a.txt"), "a\n").unwrap();
    stage(&repo, "a.txt");

    let subject = "x".repeat(150);
    let body = "word ".repeat(40);
    gitrecipe(dir.path())
        .args(["--non-interactive", "commit", "--type", "Update", "-m"])
        .arg(&subject)
        .arg("--long-message")
        .arg(body.trim())
        .assert()
        .success();

    let message = head_message(&repo);
    let mut lines = message.lines();
    assert_eq!(lines.next().unwrap().chars().count(), 102);
    assert_eq!(lines.next().unwrap(), "");
    for line in lines {
        assert!(line.chars().count() <= 100, "line too long: {line}");
        assert!(!line.starts_with(' ') && !line.ends_with(' '));
    }
}

#[test]
fn test_dry_run_prints_escaped_invocation() {
    let (dir, repo) = setup_test_repo();
    fs::write(dir.path().join("b.txt"), "b\n").unwrap();
    stage(&repo, "b.txt");

    gitrecipe(dir.path())
        .args([
            "--non-interactive",
            "commit",
            "--type",
            "Fix",
            "-m",
            "say \"hi\"",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"git commit -m "Fix: say \"hi\"""#));

    assert_eq!(head_message(&repo), "Initial commit");
}

#[test]
fn test_nothing_staged_fails_without_all() {
    let (dir, repo) = setup_test_repo();
    fs::write(dir.path().join("c.txt"), "c\n").unwrap();

    gitrecipe(dir.path())
        .args(["--non-interactive", "commit", "--type", "Fix", "-m", "nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No staged changes found"));

    assert_eq!(head_message(&repo), "Initial commit");
}

#[test]
fn test_unknown_type_suggests_closest_label() {
    let (dir, repo) = setup_test_repo();
    fs::write(dir.path().join("d.txt"), "d\n").unwrap();
    stage(&repo, "d.txt");

    gitrecipe(dir.path())
        .args(["--non-interactive", "commit", "--type", "Fxi", "-m", "typo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Did you mean 'Fix'?"));
}

#[test]
fn test_custom_catalog_from_config_file() {
    let (dir, repo) = setup_test_repo();
    fs::write(
        dir.path().join("gitrecipe.toml"),
        "[commit_types]\nFeature = \"A new feature\"\nBugfix = \"A bug fix\"\n",
    )
    .unwrap();
    stage(&repo, "gitrecipe.toml");

    gitrecipe(dir.path())
        .args(["--non-interactive", "commit", "--type", "Feature", "-m", "add config"])
        .assert()
        .success();
    assert_eq!(head_message(&repo), "Feature: add config");

    fs::write(dir.path().join("e.txt"), "e\n").unwrap();
    stage(&repo, "e.txt");
    gitrecipe(dir.path())
        .args(["--non-interactive", "commit", "--type", "Fix", "-m", "not in catalog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid commit type 'Fix'"));
}

#[test]
fn test_empty_catalog_is_a_configuration_error() {
    let (dir, repo) = setup_test_repo();
    fs::write(dir.path().join("gitrecipe.toml"), "[commit_types]\n").unwrap();
    stage(&repo, "gitrecipe.toml");

    gitrecipe(dir.path())
        .args(["--non-interactive", "commit", "--type", "Fix", "-m", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));

    assert_eq!(head_message(&repo), "Initial commit");
}
