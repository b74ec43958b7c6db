//! File processing API for quiz sources
//!
//! Every pipeline stage can be rendered on its own: the token stream, the parsed question
//! blocks, or the finished bank. A processing spec is written `<stage>-<format>`, for
//! example `token-simple` or `bank-json`.
//!
//! # Sample Sources
//!
//! The [`quiz_sources`] module gives tests access to the curated samples in
//! `docs/samples/`. Tests should load quiz content from there instead of repeating it
//! inline, so a change to the format only has to be applied to the samples.

use crate::quiz::ast::to_treeviz_str;
use crate::quiz::error::QuizError;
use crate::quiz::lexer::{lex, Token};
use crate::quiz::parsers::{reference, ParseOptions};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Which pipeline stage to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
    Bank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Treeviz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "bank-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            "bank" => ProcessingStage::Bank,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "treeviz" => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        let spec = ProcessingSpec { stage, format };
        if !Self::available_specs().contains(&spec) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "format '{}' is not supported for the {} stage",
                spec.format_name(),
                spec.stage_name()
            )));
        }
        Ok(spec)
    }

    pub fn available_specs() -> Vec<ProcessingSpec> {
        vec![
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Simple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Ast,
                format: OutputFormat::Treeviz,
            },
            ProcessingSpec {
                stage: ProcessingStage::Bank,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Bank,
                format: OutputFormat::Yaml,
            },
        ]
    }

    fn stage_name(&self) -> &'static str {
        match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
            ProcessingStage::Bank => "bank",
        }
    }

    fn format_name(&self) -> &'static str {
        match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Treeviz => "treeviz",
        }
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.stage_name(), self.format_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    FileNotFound(String),
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    IoError(String),
    Conversion(QuizError),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::FileNotFound(path) => write!(f, "File not found: {}", path),
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
            ProcessingError::Conversion(err) => write!(f, "{}", err),
        }
    }
}

impl From<QuizError> for ProcessingError {
    fn from(err: QuizError) -> Self {
        ProcessingError::Conversion(err)
    }
}

/// Render quiz source at the stage and format named by `spec`
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    options: &ParseOptions,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let tokens = lex(source).map_err(QuizError::from)?;
            format_tokens(&tokens, spec.format)
        }
        ProcessingStage::Ast => {
            let tokens = lex(source).map_err(QuizError::from)?;
            let blocks = reference::parse(&tokens, options.spacing)?;
            Ok(to_treeviz_str(&blocks))
        }
        ProcessingStage::Bank => {
            let bank = crate::quiz::convert(source, options)?;
            let rendered = match spec.format {
                OutputFormat::Yaml => bank.to_yaml()?,
                _ => bank.to_json()? + "\n",
            };
            Ok(rendered)
        }
    }
}

pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    options: &ParseOptions,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).map_err(|e| {
        ProcessingError::IoError(format!("Failed to read {}: {}", file_path.display(), e))
    })?;
    process_source(&content, spec, options)
}

/// One line of tokens per source line in the simple format
fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            let mut line = tokens.first().map(|t| t.position.line);
            for token in tokens {
                if Some(token.position.line) != line {
                    result.push('\n');
                    line = Some(token.position.line);
                }
                result.push_str(&token.to_string());
            }
            result.push('\n');
            Ok(result)
        }
        OutputFormat::Json => Ok(pretty_json(tokens)? + "\n"),
        OutputFormat::Yaml | OutputFormat::Treeviz => Err(ProcessingError::InvalidFormatType(
            "only simple and json work for the token stage".to_string(),
        )),
    }
}

fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ProcessingError> {
    Ok(serde_json::to_string_pretty(value).map_err(QuizError::from)?)
}

pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::to_string)
        .collect()
}

/// Access to the curated quiz samples
pub mod quiz_sources {
    use super::*;

    pub const SAMPLES_DIR: &str = "docs/samples";

    /// Available sample files (canonical sources)
    pub const AVAILABLE_SAMPLES: &[&str] = &[
        "000-single-choice.quiz",
        "010-code-block.quiz",
        "020-multiple-questions.quiz",
        "030-missing-answer.quiz",
        "040-invalid-character.quiz",
        "050-unterminated-code.quiz",
    ];

    pub struct QuizSources;

    impl QuizSources {
        fn sample_path(filename: &str) -> String {
            format!("{}/{}", SAMPLES_DIR, filename)
        }

        fn validate_sample(filename: &str) -> Result<(), ProcessingError> {
            if !AVAILABLE_SAMPLES.contains(&filename) {
                return Err(ProcessingError::FileNotFound(format!(
                    "Sample '{}' is not available. Available samples: {:?}",
                    filename, AVAILABLE_SAMPLES
                )));
            }
            Ok(())
        }

        pub fn get_string(filename: &str) -> Result<String, ProcessingError> {
            Self::validate_sample(filename)?;
            let path = Self::sample_path(filename);
            fs::read_to_string(&path)
                .map_err(|e| ProcessingError::IoError(format!("Failed to read {}: {}", path, e)))
        }

        /// Sample content rendered with a processing spec string
        pub fn get_processed(
            filename: &str,
            format: &str,
            options: &ParseOptions,
        ) -> Result<String, ProcessingError> {
            let spec = ProcessingSpec::from_string(format)?;
            let content = Self::get_string(filename)?;
            process_source(&content, &spec, options)
        }

        pub fn list_samples() -> Vec<&'static str> {
            AVAILABLE_SAMPLES.to_vec()
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::error::StructuralError;

    const SOURCE: &str = "1. Pick\n\ta. x\n\tb. y\nA. (b)\n";

    #[test]
    fn test_processing_spec_parsing() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Token);
        assert_eq!(spec.format, OutputFormat::Simple);

        let spec = ProcessingSpec::from_string("bank-yaml").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Bank);
        assert_eq!(spec.format, OutputFormat::Yaml);

        assert!(ProcessingSpec::from_string("invalid").is_err());
        assert!(ProcessingSpec::from_string("token-invalid").is_err());
        assert!(ProcessingSpec::from_string("invalid-simple").is_err());
        assert!(ProcessingSpec::from_string("ast-json").is_err());
        assert!(ProcessingSpec::from_string("token-treeviz").is_err());
    }

    #[test]
    fn test_available_formats() {
        assert_eq!(
            available_formats(),
            vec!["token-simple", "token-json", "ast-treeviz", "bank-json", "bank-yaml"]
        );
    }

    #[test]
    fn test_token_simple_breaks_on_source_lines() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let output = process_source(SOURCE, &spec, &ParseOptions::default()).unwrap();
        insta::assert_snapshot!(output.trim_end(), @r###"
        <number:1><symbol:.><word:Pick>
        <tab><lower:a><symbol:.><lower:x>
        <tab><lower:b><symbol:.><lower:y>
        <upper:A><symbol:.><symbol:(><lower:b><symbol:)>
        <end>
        "###);
    }

    #[test]
    fn test_token_json() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        let output = process_source("1.", &spec, &ParseOptions::default()).unwrap();
        assert!(output.contains("\"kind\": \"Number\""));
        assert!(output.contains("\"kind\": \"EndMarker\""));
    }

    #[test]
    fn test_ast_treeviz() {
        let spec = ProcessingSpec::from_string("ast-treeviz").unwrap();
        let output = process_source(SOURCE, &spec, &ParseOptions::default()).unwrap();
        assert!(output.starts_with("└─ Question 1.: Pick"));
        assert!(output.contains("Choice b.: y *"));
    }

    #[test]
    fn test_bank_json() {
        let spec = ProcessingSpec::from_string("bank-json").unwrap();
        let output = process_source(SOURCE, &spec, &ParseOptions::default()).unwrap();
        assert!(output.contains("\"question_before\": \"Pick\""));
    }

    #[test]
    fn test_conversion_errors_pass_through() {
        let spec = ProcessingSpec::from_string("bank-json").unwrap();
        let err = process_source("1. Q?\nA. (a)\n", &spec, &ParseOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ProcessingError::Conversion(QuizError::Structural(StructuralError::NoChoices {
                question: 1
            }))
        );
        assert_eq!(err.to_string(), "StructuralError: question 1: no choices given");
    }

    #[test]
    fn test_process_missing_file() {
        let spec = ProcessingSpec::from_string("bank-json").unwrap();
        let err = process_file("does/not/exist.quiz", &spec, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ProcessingError::IoError(_)));
    }

    #[test]
    fn test_json_failure_is_a_serialization_error() {
        let mut keyed = std::collections::HashMap::new();
        keyed.insert((1, 2), "tuple keys are not json keys");

        let err = pretty_json(&keyed).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::Conversion(QuizError::Serialization(_))
        ));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
