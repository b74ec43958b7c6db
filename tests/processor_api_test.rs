//! Integration tests for the quiz processor API

use quizbank::quiz::processor::quiz_sources::QuizSources;
use quizbank::quiz::processor::{
    process_file, process_source, OutputFormat, ProcessingError, ProcessingSpec, ProcessingStage,
};
use quizbank::quiz::{Engine, ParseOptions, QuestionBank};

#[test]
fn test_available_specs() {
    let specs = ProcessingSpec::available_specs();
    assert_eq!(specs.len(), 5);
    assert!(specs
        .iter()
        .any(|s| s.stage == ProcessingStage::Ast && s.format == OutputFormat::Treeviz));
    assert!(specs
        .iter()
        .all(|s| ProcessingSpec::from_string(&s.to_string()).as_ref() == Ok(s)));
}

#[test]
fn test_ast_treeviz_of_sample() {
    let output = QuizSources::get_processed(
        "020-multiple-questions.quiz",
        "ast-treeviz",
        &ParseOptions::default(),
    )
    .unwrap();

    insta::assert_snapshot!(output.trim_end(), @r###"
    ├─ Question 1.: Which of these are immutable t...
    │ ├─ Choice a.: tuple *
    │ ├─ Choice b.: list
    │ ├─ Choice c.: str *
    │ └─ Answers: (a,c)
    ├─ Question 2.: What is printed by
    │ ├─ Code: 3 line(s)
    │ ├─ Trailing: when run?
    │ ├─ Choice a.: 1
    │ ├─ Choice b.: 2 *
    │ └─ Answers: (b)
    └─ Question 3.: Pick every even number
      ├─ Choice a.: 2 *
      ├─ Choice b.: 3
      ├─ Choice c.: 4 *
      └─ Answers: (c,a)
    "###);
}

#[test]
fn test_bank_json_matches_writer() {
    let spec = ProcessingSpec::from_string("bank-json").unwrap();
    let options = ParseOptions::default().with_engine(Engine::LineBased);
    let output = process_file("docs/samples/010-code-block.quiz", &spec, &options).unwrap();

    let bank = QuestionBank::from_json(&output).unwrap();
    assert_eq!(bank.records()[0].question_code, vec!["print(1+1)"]);
    assert_eq!(output, bank.to_json().unwrap() + "\n");
}

#[test]
fn test_bank_yaml() {
    let spec = ProcessingSpec::from_string("bank-yaml").unwrap();
    let source = QuizSources::get_string("010-code-block.quiz").unwrap();
    let output = process_source(&source, &spec, &ParseOptions::default()).unwrap();
    assert!(output.contains("question_code:"));
    assert!(output.contains("print(1+1)"));
}

#[test]
fn test_file_not_found_error() {
    let spec = ProcessingSpec::from_string("token-simple").unwrap();
    let result = process_file("nonexistent.quiz", &spec, &ParseOptions::default());
    assert!(matches!(result, Err(ProcessingError::IoError(_))));
}

#[test]
fn test_unknown_stage() {
    assert_eq!(
        ProcessingSpec::from_string("record-json"),
        Err(ProcessingError::InvalidStage("record".to_string()))
    );
}

#[test]
fn test_lex_errors_surface_through_token_stage() {
    let spec = ProcessingSpec::from_string("token-json").unwrap();
    let err = process_file(
        "docs/samples/040-invalid-character.quiz",
        &spec,
        &ParseOptions::default(),
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("LexError: invalid character '@'"));
}
