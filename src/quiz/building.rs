//! Building question records from parsed questions
//!
//! The reference parser hands over finished [`QuestionBlock`]s, which are replayed through
//! a [`QuestionBuilder`] here. The line-based engine drives the builder directly while it
//! classifies lines. Either way every record passes through [`QuestionBuilder::finish`],
//! where the choice and answer invariants are checked.

pub mod builder;
pub mod record;

pub use builder::{AnswerBuilder, QuestionBuilder};
pub use record::{AnswerRecord, QuestionRecord};

use crate::quiz::ast::node::QuestionBlock;
use crate::quiz::bank::QuestionBank;
use crate::quiz::error::StructuralError;

/// Serialize parsed blocks, in order, into a question bank
pub fn blocks_to_bank(blocks: &[QuestionBlock]) -> Result<QuestionBank, StructuralError> {
    let mut bank = QuestionBank::new();
    let mut builder = QuestionBuilder::new();

    for block in blocks {
        builder.push_before(block.statement.as_str());
        if !block.code.is_empty() {
            builder.open_code(block.code_opened_at);
            for line in &block.code {
                builder.push_code(line);
            }
            builder.close_code();
        }
        builder.push_after(block.trailing.as_str());
        for choice in &block.choices {
            builder.push_choice(choice.statement.as_str());
        }

        let record = builder.finish(bank.len() + 1, block.answers.indices())?;
        bank.push(record);
    }

    tracing::debug!(records = bank.len(), "built question bank");
    Ok(bank)
}
