//! Integration tests for the typokit CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn typokit() -> Command {
    Command::cargo_bin("typokit").unwrap()
}

#[test]
fn test_process_plain_text() {
    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain.txt"))
        .arg("-c")
        .arg(fixture_path("visible-hyphen.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("&ldquo;as-so-ciate&rdquo;"))
        .stdout(predicate::str::contains("&mdash;"))
        .stdout(predicate::str::contains("wait&hellip;"));
}

#[test]
fn test_correct_mode_does_not_hyphenate() {
    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain.txt"))
        .arg("-c")
        .arg(fixture_path("visible-hyphen.toml"))
        .arg("--mode")
        .arg("correct");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("&ldquo;associate&rdquo;"))
        .stdout(predicate::str::contains("as-so-ciate").not());
}

#[test]
fn test_mode_from_config_file() {
    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain.txt"))
        .arg("-c")
        .arg(fixture_path("hyphenate-only.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"as-so-ciate\""))
        .stdout(predicate::str::contains("&ldquo;").not());
}

#[test]
fn test_process_html_keeps_pre() {
    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("page.html"))
        .arg("-c")
        .arg(fixture_path("visible-hyphen.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<p>The &ldquo;associate&rdquo;"))
        .stdout(predicate::str::contains("with an as-so-ciate&hellip;</p>"))
        .stdout(predicate::str::contains("<pre>\"raw\" -- text</pre>"));
}

#[test]
fn test_html_off_treats_tags_as_text() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("link.html");
    fs::write(&input, "<a href=\"x\">link</a>\n").unwrap();

    typokit()
        .arg("process")
        .arg("-i")
        .arg(&input)
        .arg("--mode")
        .arg("correct")
        .assert()
        .success()
        .stdout(predicate::str::contains("<a href=\"x\">link</a>"));

    typokit()
        .arg("process")
        .arg("-i")
        .arg(&input)
        .arg("--mode")
        .arg("correct")
        .arg("--html")
        .arg("off")
        .assert()
        .success()
        .stdout(predicate::str::contains("href=&rdquo;x&rdquo;"));
}

#[test]
fn test_json_output() {
    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("page.html"))
        .arg("-f")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains("\"file\""))
        .stdout(predicate::str::contains("\"is_html\": true"))
        .stdout(predicate::str::contains("\"language\": \"en\""))
        .stdout(predicate::str::contains("\"words_hyphenated\""));
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("output.txt");

    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain.txt"))
        .arg("-o")
        .arg(&output_file);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("&mdash;"));
}

#[test]
fn test_glob_pattern() {
    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("*.txt"))
        .arg("--threads")
        .arg("2");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("wait&hellip;"))
        .stdout(predicate::str::contains("It&rsquo;s"));
}

#[test]
fn test_invalid_file() {
    let mut cmd = typokit();
    cmd.arg("process").arg("-i").arg("nonexistent.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_zero_threads_rejected() {
    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain.txt"))
        .arg("--threads")
        .arg("0");

    cmd.assert().failure().stderr(predicate::str::contains(
        "Thread count must be greater than 0",
    ));
}

#[test]
fn test_unknown_language() {
    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain.txt"))
        .arg("-l")
        .arg("zz");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Language data not available: zz"));
}

#[test]
fn test_data_dir_language() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("words.txt");
    fs::write(&input, "hyphen in hyphens\n").unwrap();

    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(&input)
        .arg("-l")
        .arg("xx_YY")
        .arg("--data-dir")
        .arg(fixture_path("data"))
        .arg("--mode")
        .arg("hyphenate")
        .arg("-c")
        .arg(fixture_path("visible-hyphen.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("hy-phen in hy-phens\n"));
}

#[test]
fn test_missing_config_file() {
    let mut cmd = typokit();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("plain.txt"))
        .arg("-c")
        .arg("nonexistent.toml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_help_command() {
    let mut cmd = typokit();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Hyphenation and typographic correction"))
        .stdout(predicate::str::contains("generate-data"));
}

#[test]
fn test_list_languages() {
    typokit()
        .arg("list")
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("en"));

    typokit()
        .arg("list")
        .arg("languages")
        .arg("--data-dir")
        .arg(fixture_path("data"))
        .assert()
        .success()
        .stdout(predicate::str::contains("xx       - Test Language"));
}

#[test]
fn test_validate_data_file() {
    typokit()
        .arg("validate")
        .arg("-d")
        .arg(fixture_path("data/xx.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Language data is valid"))
        .stdout(predicate::str::contains("Language code: xx"))
        .stdout(predicate::str::contains("Patterns: 2"));

    typokit()
        .arg("validate")
        .arg("-d")
        .arg(fixture_path("broken/xx.toml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Language data is invalid"))
        .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn test_generate_then_validate() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("qq.toml");

    typokit()
        .arg("generate-data")
        .arg("-l")
        .arg("qq")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("template generated"));

    typokit()
        .arg("validate")
        .arg("-d")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Language code: qq"));

    // The generated file works as a data directory entry
    let input = temp_dir.path().join("in.txt");
    fs::write(&input, "text\n").unwrap();
    typokit()
        .arg("process")
        .arg("-i")
        .arg(&input)
        .arg("-l")
        .arg("qq")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();
}
