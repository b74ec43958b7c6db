//! Main module for quizbank library functionality
//!
//! The pipeline runs strictly forward: source text is lexed into tokens, the tokens are
//! parsed into question blocks, and the blocks are built into a [`QuestionBank`]. The
//! line-based engine skips the token stage and feeds the builder straight from lines.

pub mod ast;
pub mod bank;
pub mod building;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parsers;
pub mod processor;
pub mod testing;

pub use bank::QuestionBank;
pub use error::QuizError;
pub use parsers::{Engine, ParseOptions, Spacing};

/// Convert quiz source into a question bank with the selected engine
pub fn convert(source: &str, options: &ParseOptions) -> Result<QuestionBank, QuizError> {
    tracing::debug!(engine = %options.engine, spacing = %options.spacing, "converting quiz source");
    match options.engine {
        Engine::Reference => {
            let tokens = lexer::lex(source)?;
            let blocks = parsers::reference::parse(&tokens, options.spacing)?;
            Ok(building::blocks_to_bank(&blocks)?)
        }
        Engine::LineBased => parsers::linebased::parse(source),
    }
}
