//! Lexer module for the quiz format
//!
//! Turns raw quiz text into a flat token sequence terminated by a single
//! [`TokenKind::EndMarker`]. Spaces, newlines and `--` comments produce no token; the
//! parser recovers structure from the adjacency of tabs, letters and numbers alone.
//!
//! Character classes, first match wins:
//!
//! 1. spaces are skipped
//! 2. `--` starts a comment running to the end of the line
//! 3. a tab becomes [`TokenKind::Tab`]
//! 4. a character from [`SYMBOLS`] becomes [`TokenKind::Symbol`]
//! 5. newlines are skipped
//! 6. a digit run becomes [`TokenKind::Number`]
//! 7. a letter run becomes a word, or a single upper/lower letter
//! 8. anything else is a [`LexError`](crate::quiz::error::LexError)
//!
//! Lines consisting of the `"""` fence switch the lexer into code mode, where each line is
//! emitted untouched as a [`TokenKind::CodeLine`] until the closing fence.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::tokenize;
pub use tokens::{RawToken, Token, TokenKind, CODE_FENCE, SYMBOLS};

use crate::quiz::error::LexError;

/// Main lexer entry point
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = tokenize(source)?;
    tracing::debug!(tokens = tokens.len(), bytes = source.len(), "lexed quiz source");
    Ok(tokens)
}
