//! Integration tests for the quizbank binary

use assert_cmd::Command;
use predicates::prelude::*;
use quizbank::quiz::QuestionBank;

fn quizbank() -> Command {
    Command::cargo_bin("quizbank").unwrap()
}

#[test]
fn test_convert_prints_json() {
    quizbank()
        .args(["convert", "docs/samples/000-single-choice.quiz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"question_before\": \"Is2+2 equal to4?\""));
}

#[test]
fn test_convert_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("bank.json");

    quizbank()
        .args(["convert", "docs/samples/020-multiple-questions.quiz", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let bank = QuestionBank::read_from(&output).unwrap();
    assert_eq!(bank.len(), 3);
}

#[test]
fn test_convert_yaml_with_flags() {
    quizbank()
        .args([
            "convert",
            "docs/samples/000-single-choice.quiz",
            "--format",
            "yaml",
            "--spacing",
            "source",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("question_before:")
                .and(predicate::str::contains("Is 2+2 equal to 4?")),
        );
}

#[test]
fn test_failed_conversion_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("bank.json");

    quizbank()
        .args(["convert", "docs/samples/050-unterminated-code.quiz", "-o"])
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: StructuralError: question 1: code block not correctly ended",
        ));

    assert!(!output.exists());
}

#[test]
fn test_lex_error_is_one_line() {
    quizbank()
        .args(["check", "docs/samples/040-invalid-character.quiz"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: LexError: invalid character '@' at 2:7"))
        .stderr(predicate::function(|err: &str| err.lines().count() == 1));
}

#[test]
fn test_check_counts_questions() {
    quizbank()
        .args(["check", "docs/samples/020-multiple-questions.quiz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 question(s)"));
}

#[test]
fn test_check_with_line_based_engine() {
    quizbank()
        .args([
            "check",
            "docs/samples/040-invalid-character.quiz",
            "--engine",
            "line-based",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 question(s)"));
}

#[test]
fn test_inspect_tokens() {
    quizbank()
        .args([
            "inspect",
            "docs/samples/000-single-choice.quiz",
            "--format",
            "token-simple",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<number:1><symbol:.><word:Is>"));
}

#[test]
fn test_inspect_rejects_unknown_format() {
    quizbank()
        .args(["inspect", "docs/samples/000-single-choice.quiz", "--format", "ast-xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid format type"));
}

#[test]
fn test_config_file_selects_engine() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("quizbank.toml");
    std::fs::write(&config, "[parsing]\nengine = \"line-based\"\n").unwrap();

    quizbank()
        .args(["check", "docs/samples/040-invalid-character.quiz", "--config"])
        .arg(&config)
        .assert()
        .success();
}

#[test]
fn test_formats_lists_every_spec() {
    quizbank()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("token-simple"))
        .stdout(predicate::str::contains("bank-yaml"));
}
