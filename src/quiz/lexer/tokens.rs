//! Token definitions for the quiz format
//!
//! Character-level classification is done by the logos derive on [`RawToken`]. The raw
//! tokens are then lifted into [`Token`], which carries the classified [`TokenKind`], the
//! captured lexeme and its source location. Runs of letters are split into words and
//! single letters at that point, since the grammar cares about the difference (`a.` opens
//! a choice, `A.` opens the answer line) while logos only sees `[A-Za-z]+`.

use crate::quiz::ast::span::Position;
use logos::Logos;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Characters accepted as single-character symbols
pub const SYMBOLS: &str = "\\-':?_;.,<>/()+=*!\"[]{}%&|#";

/// The marker line that opens and closes a code block
pub const CODE_FENCE: &str = "\"\"\"";

/// Raw tokens produced by logos for a single non-code line
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r" +")]
#[logos(skip r"--[^\n]*")]
#[logos(skip r"\n")]
pub enum RawToken {
    #[token("\t")]
    Tab,

    #[regex(r#"[\\\-':?_;.,<>/()+=*!"\[\]{}%&|#]"#)]
    Symbol,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[a-zA-Z]+")]
    Alpha,
}

/// The closed set of token kinds the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Word,
    LetterUpper,
    LetterLower,
    Number,
    Symbol,
    Tab,
    CodeFence,
    CodeLine,
    EndMarker,
}

impl TokenKind {
    /// Words and single letters
    pub fn is_word_like(self) -> bool {
        match self {
            TokenKind::Word | TokenKind::LetterUpper | TokenKind::LetterLower => true,
            TokenKind::Number
            | TokenKind::Symbol
            | TokenKind::Tab
            | TokenKind::CodeFence
            | TokenKind::CodeLine
            | TokenKind::EndMarker => false,
        }
    }

    /// Kinds that may appear inside a sentence
    pub fn is_sentence_part(self) -> bool {
        match self {
            TokenKind::Word
            | TokenKind::LetterUpper
            | TokenKind::LetterLower
            | TokenKind::Number
            | TokenKind::Symbol => true,
            TokenKind::Tab | TokenKind::CodeFence | TokenKind::CodeLine | TokenKind::EndMarker => {
                false
            }
        }
    }

    fn tag(self) -> &'static str {
        match self {
            TokenKind::Word => "word",
            TokenKind::LetterUpper => "upper",
            TokenKind::LetterLower => "lower",
            TokenKind::Number => "number",
            TokenKind::Symbol => "symbol",
            TokenKind::Tab => "tab",
            TokenKind::CodeFence => "fence",
            TokenKind::CodeLine => "code",
            TokenKind::EndMarker => "end",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Word => "word",
            TokenKind::LetterUpper => "uppercase letter",
            TokenKind::LetterLower => "lowercase letter",
            TokenKind::Number => "number",
            TokenKind::Symbol => "symbol",
            TokenKind::Tab => "tab",
            TokenKind::CodeFence => "code fence",
            TokenKind::CodeLine => "code line",
            TokenKind::EndMarker => "end of input",
        };
        f.write_str(name)
    }
}

/// A classified token with its exact source text and location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Range<usize>,
    pub position: Position,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        span: Range<usize>,
        position: Position,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            position,
        }
    }

    /// Lift a logos token into a classified token
    pub fn from_raw(raw: RawToken, lexeme: &str, span: Range<usize>, position: Position) -> Self {
        let kind = match raw {
            RawToken::Tab => TokenKind::Tab,
            RawToken::Symbol => TokenKind::Symbol,
            RawToken::Number => TokenKind::Number,
            RawToken::Alpha => classify_alpha(lexeme),
        };
        Self::new(kind, lexeme, span, position)
    }

    /// Check kind and exact lexeme at once
    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }

    pub fn is_period(&self) -> bool {
        self.is(TokenKind::Symbol, ".")
    }

    /// Lowercase words and lowercase single letters
    pub fn is_lowercase_word(&self) -> bool {
        match self.kind {
            TokenKind::LetterLower => true,
            TokenKind::Word => self.lexeme.starts_with(|c: char| c.is_ascii_lowercase()),
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Tab | TokenKind::CodeFence | TokenKind::EndMarker => {
                write!(f, "<{}>", self.kind.tag())
            }
            kind => write!(f, "<{}:{}>", kind.tag(), self.lexeme),
        }
    }
}

fn classify_alpha(lexeme: &str) -> TokenKind {
    let mut chars = lexeme.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => TokenKind::LetterUpper,
        (Some(_), None) => TokenKind::LetterLower,
        _ => TokenKind::Word,
    }
}
