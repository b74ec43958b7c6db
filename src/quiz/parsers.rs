//! Parsing engines
//!
//! Two engines implement the same contract: quiz source in, question bank out.
//!
//! - [`reference`] is the token based recursive descent parser. It is the default and
//!   gives the most precise diagnostics.
//! - [`linebased`] classifies whole lines with regexes and drives the question builder
//!   directly. It accepts any character inside prose, at the cost of coarser errors.

pub mod linebased;
pub mod reference;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A line that opens a correct-answer list, `A.` followed by `(`
pub(crate) static ANSWER_INTRODUCER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*A\.\s*\(").unwrap());

/// Which engine turns source into records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Engine {
    #[default]
    Reference,
    LineBased,
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reference" => Ok(Engine::Reference),
            "line-based" | "linebased" => Ok(Engine::LineBased),
            _ => Err(format!("unknown engine '{}' (expected reference or line-based)", s)),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Reference => f.write_str("reference"),
            Engine::LineBased => f.write_str("line-based"),
        }
    }
}

/// How the reference parser puts spaces back between tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Spacing {
    /// Space between words, and before a lowercase word unless a period precedes it
    #[default]
    Designed,
    /// Space wherever the source had whitespace
    Source,
}

impl FromStr for Spacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "designed" => Ok(Spacing::Designed),
            "source" => Ok(Spacing::Source),
            _ => Err(format!("unknown spacing '{}' (expected designed or source)", s)),
        }
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spacing::Designed => f.write_str("designed"),
            Spacing::Source => f.write_str("source"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub engine: Engine,
    pub spacing: Spacing,
}

impl ParseOptions {
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }
}
