//! AST definitions and utilities for the quiz format
//!
//! ## Modules
//!
//! - `span` - Positions in quiz source
//! - `node` - Question block nodes produced by the parser
//! - `treeviz` - Tree rendering of parsed blocks

pub mod node;
pub mod span;
pub mod treeviz;

pub use node::{
    index_letter, letter_index, AnswerSet, ChoiceId, ChoiceStatement, QuestionBlock, QuestionId,
    Sentence,
};
pub use span::Position;
pub use treeviz::to_treeviz_str;
