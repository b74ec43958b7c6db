//! Error types for the quiz pipeline
//!
//! Every error here is fatal to the run that produced it. Nothing is recovered locally,
//! so each type carries enough location detail for a single diagnostic line to say exactly
//! where and why conversion stopped.

use crate::quiz::ast::span::Position;
use crate::quiz::lexer::tokens::{Token, TokenKind};
use std::fmt;

/// An unrecognized character in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub character: char,
    /// Byte offset of the character in the source
    pub offset: usize,
    pub position: Position,
}

impl LexError {
    pub fn new(character: char, offset: usize, position: Position) -> Self {
        Self {
            character,
            offset,
            position,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid character {:?} at {} (offset {})",
            self.character, self.position, self.offset
        )
    }
}

impl std::error::Error for LexError {}

/// What a grammar production asked the cursor for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Any token of this kind
    Kind(TokenKind),
    /// A token of this kind with exactly this lexeme
    Exact(TokenKind, &'static str),
}

impl Expect {
    pub fn matches(&self, token: &Token) -> bool {
        match *self {
            Expect::Kind(kind) => token.kind == kind,
            Expect::Exact(kind, lexeme) => token.is(kind, lexeme),
        }
    }
}

impl From<TokenKind> for Expect {
    fn from(kind: TokenKind) -> Self {
        Expect::Kind(kind)
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::Kind(kind) => write!(f, "{}", kind),
            Expect::Exact(kind, lexeme) => write!(f, "{} '{}'", kind, lexeme),
        }
    }
}

/// A token that did not fit the active grammar production
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub production: &'static str,
    pub expected: Expect,
    pub found: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl ParseError {
    pub fn unexpected(production: &'static str, expected: Expect, token: &Token) -> Self {
        Self {
            production,
            expected,
            found: token.kind,
            lexeme: token.lexeme.clone(),
            position: token.position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found {
            TokenKind::EndMarker => write!(
                f,
                "{}: expected {} at {}, found end of input",
                self.production, self.expected, self.position
            ),
            found => write!(
                f,
                "{}: expected {} at {}, found {} {:?}",
                self.production, self.expected, self.position, found, self.lexeme
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Invariant violations that are not a single token mismatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// A code block was still open when the answer line (or end of input) arrived
    UnterminatedCodeBlock {
        question: usize,
        opened_at: Option<Position>,
    },
    /// Tokens remained after the last question block
    UnconsumedTokens { position: Position, preview: String },
    /// The question has no choice lines
    NoChoices { question: usize },
    /// The answer line names a choice the question does not have
    AnswerOutOfRange {
        question: usize,
        letter: char,
        choices: usize,
    },
    /// Choice letters must run a, b, c, ... in order
    ChoiceOutOfOrder {
        question: usize,
        expected: char,
        found: char,
        position: Position,
    },
    /// Input ended before the question's answer line
    IncompleteQuestion { question: usize },
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralError::UnterminatedCodeBlock {
                question,
                opened_at: Some(at),
            } => write!(
                f,
                "question {}: code block not correctly ended (opened at {})",
                question, at
            ),
            StructuralError::UnterminatedCodeBlock {
                question,
                opened_at: None,
            } => write!(f, "question {}: code block not correctly ended", question),
            StructuralError::UnconsumedTokens { position, preview } => {
                write!(f, "not all tokens consumed at {}: {}", position, preview)
            }
            StructuralError::NoChoices { question } => {
                write!(f, "question {}: no choices given", question)
            }
            StructuralError::AnswerOutOfRange {
                question,
                letter,
                choices,
            } => write!(
                f,
                "question {}: answer '{}' does not match any of its {} choices",
                question, letter, choices
            ),
            StructuralError::ChoiceOutOfOrder {
                question,
                expected,
                found,
                position,
            } => write!(
                f,
                "question {}: expected choice '{}.' at {}, found '{}.'",
                question, expected, position, found
            ),
            StructuralError::IncompleteQuestion { question } => {
                write!(f, "question {}: input ended before its answer line", question)
            }
        }
    }
}

impl std::error::Error for StructuralError {}

/// Whether a code block is open, and whether one has been added to the question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeBlockState {
    pub open: bool,
    pub added: bool,
}

impl fmt::Display for CodeBlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code block {}, {}",
            if self.open { "open" } else { "closed" },
            if self.added { "added" } else { "not added" }
        )
    }
}

/// A line the line-based engine could not classify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedLineError {
    pub question: usize,
    /// One-based line number
    pub line: usize,
    pub content: String,
    pub code_block: CodeBlockState,
}

impl fmt::Display for UnrecognizedLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "question {}, line {}: unrecognized line {:?} ({})",
            self.question, self.line, self.content, self.code_block
        )
    }
}

impl std::error::Error for UnrecognizedLineError {}

/// Any failure of a conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    Lex(LexError),
    Parse(ParseError),
    Structural(StructuralError),
    UnrecognizedLine(UnrecognizedLineError),
    Io(String),
    Serialization(String),
    Config(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::Lex(e) => write!(f, "LexError: {}", e),
            QuizError::Parse(e) => write!(f, "ParseError: {}", e),
            QuizError::Structural(e) => write!(f, "StructuralError: {}", e),
            QuizError::UnrecognizedLine(e) => write!(f, "UnrecognizedLineError: {}", e),
            QuizError::Io(msg) => write!(f, "IO error: {}", msg),
            QuizError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            QuizError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Lex(e) => Some(e),
            QuizError::Parse(e) => Some(e),
            QuizError::Structural(e) => Some(e),
            QuizError::UnrecognizedLine(e) => Some(e),
            QuizError::Io(_) | QuizError::Serialization(_) | QuizError::Config(_) => None,
        }
    }
}

impl From<LexError> for QuizError {
    fn from(err: LexError) -> Self {
        QuizError::Lex(err)
    }
}

impl From<ParseError> for QuizError {
    fn from(err: ParseError) -> Self {
        QuizError::Parse(err)
    }
}

impl From<StructuralError> for QuizError {
    fn from(err: StructuralError) -> Self {
        QuizError::Structural(err)
    }
}

impl From<UnrecognizedLineError> for QuizError {
    fn from(err: UnrecognizedLineError) -> Self {
        QuizError::UnrecognizedLine(err)
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        QuizError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for QuizError {
    fn from(err: serde_yaml::Error) -> Self {
        QuizError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for QuizError {
    fn from(err: config::ConfigError) -> Self {
        QuizError::Config(err.to_string())
    }
}
