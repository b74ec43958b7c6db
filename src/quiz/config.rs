//! Configuration loader
//!
//! `defaults/quizbank.default.toml` is embedded into the binary so documented defaults and
//! runtime behavior stay in sync. User files and CLI flags are layered on top through
//! [`Loader`] before deserializing into [`QuizConfig`].

use crate::quiz::parsers::{Engine, ParseOptions, Spacing};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/quizbank.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    pub parsing: ParsingConfig,
    pub output: OutputConfig,
}

impl QuizConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            engine: self.parsing.engine,
            spacing: self.parsing.spacing,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub engine: Engine,
    pub spacing: Spacing,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: BankFormat,
}

/// Serialization used when writing a bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BankFormat {
    Json,
    Yaml,
}

/// Layers user overrides over the built-in defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may be absent
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<QuizConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<QuizConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parsing.engine, Engine::Reference);
        assert_eq!(config.parsing.spacing, Spacing::Designed);
        assert_eq!(config.output.format, BankFormat::Json);
        assert_eq!(config.parse_options(), ParseOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parsing.engine", "line-based")
            .expect("override to apply")
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parsing.engine, Engine::LineBased);
        assert_eq!(config.output.format, BankFormat::Yaml);
    }

    #[test]
    fn layers_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizbank.toml");
        std::fs::write(&path, "[parsing]\nspacing = \"source\"\n").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.parsing.spacing, Spacing::Source);
        assert_eq!(config.parsing.engine, Engine::Reference);
    }

    #[test]
    fn optional_file_may_be_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .unwrap();
        assert_eq!(config.output.format, BankFormat::Json);
    }

    #[test]
    fn rejects_unknown_engine() {
        let result = Loader::new()
            .set_override("parsing.engine", "guess")
            .unwrap()
            .build();
        assert!(result.is_err());
    }
}
