//! Reference parser
//!
//! Recursive descent over the lexer's token buffer. The cursor is a plain index into an
//! immutable slice, lookahead is bounded to three tokens, and nothing is ever backtracked.
//! The parser fails on the first malformed question; there is no partial result.

pub mod cursor;
pub mod grammar;
pub mod sentence;

pub use cursor::TokenCursor;
pub use grammar::Parser;

use crate::quiz::ast::node::QuestionBlock;
use crate::quiz::error::QuizError;
use crate::quiz::lexer::tokens::Token;
use crate::quiz::parsers::Spacing;

/// Parse a token buffer into question blocks
pub fn parse(tokens: &[Token], spacing: Spacing) -> Result<Vec<QuestionBlock>, QuizError> {
    let blocks = Parser::new(tokens, spacing).parse()?;
    tracing::debug!(blocks = blocks.len(), "parsed question blocks");
    Ok(blocks)
}
