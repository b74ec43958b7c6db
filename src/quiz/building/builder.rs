//! Question builder
//!
//! Accumulates the pieces of one question as they are recognized and turns them into a
//! [`QuestionRecord`] once the answer line arrives. Both parsing engines drive the same
//! builder, which is what keeps their output identical.

use crate::quiz::ast::node::index_letter;
use crate::quiz::ast::span::Position;
use crate::quiz::building::record::{AnswerRecord, QuestionRecord};
use crate::quiz::error::{CodeBlockState, StructuralError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerBuilder {
    pub text: String,
    pub correct: bool,
}

impl AnswerBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: false,
        }
    }

    pub fn serialize(&self) -> AnswerRecord {
        AnswerRecord::new(self.text.clone(), self.correct)
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuestionBuilder {
    before: Vec<String>,
    after: Vec<String>,
    code: Vec<String>,
    /// Lines of the code block currently open
    pending: Vec<String>,
    answers: Vec<AnswerBuilder>,
    code_state: CodeBlockState,
    opened_at: Option<Position>,
}

impl QuestionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_before(&mut self, text: &str) {
        push_fragment(&mut self.before, text);
    }

    pub fn push_after(&mut self, text: &str) {
        push_fragment(&mut self.after, text);
    }

    /// Question text goes after the code once a code block has been added
    pub fn push_text(&mut self, text: &str) {
        if self.code_state.added {
            self.push_after(text);
        } else {
            self.push_before(text);
        }
    }

    pub fn open_code(&mut self, at: Option<Position>) {
        self.code_state.open = true;
        self.opened_at = at;
    }

    pub fn push_code(&mut self, line: &str) {
        self.pending.push(line.to_string());
    }

    /// Close the open block, stripping the indentation its lines share
    pub fn close_code(&mut self) {
        let lines = std::mem::take(&mut self.pending);
        self.code.extend(dedent(&lines));
        self.code_state.open = false;
        self.code_state.added = true;
        self.opened_at = None;
    }

    pub fn push_choice(&mut self, text: &str) {
        self.answers.push(AnswerBuilder::new(text.trim()));
    }

    /// Continue the text of the most recent choice
    pub fn extend_choice(&mut self, text: &str) {
        let text = text.trim();
        if let Some(last) = self.answers.last_mut() {
            if !text.is_empty() {
                last.text.push(' ');
                last.text.push_str(text);
            }
        }
    }

    pub fn code_block_state(&self) -> CodeBlockState {
        self.code_state
    }

    /// Where the open code block started, if one is open
    pub fn opened_at(&self) -> Option<Position> {
        self.opened_at
    }

    pub fn choice_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty()
            && self.after.is_empty()
            && self.code.is_empty()
            && self.pending.is_empty()
            && self.answers.is_empty()
            && !self.code_state.open
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Mark the correct choices, emit the record and reset for the next question
    ///
    /// `question` is the one-based position of the question in the file and only feeds
    /// diagnostics.
    pub fn finish(
        &mut self,
        question: usize,
        correct: &[usize],
    ) -> Result<QuestionRecord, StructuralError> {
        if self.code_state.open {
            return Err(StructuralError::UnterminatedCodeBlock {
                question,
                opened_at: self.opened_at,
            });
        }
        if self.answers.is_empty() {
            return Err(StructuralError::NoChoices { question });
        }
        if let Some(&index) = correct.iter().find(|&&i| i >= self.answers.len()) {
            return Err(StructuralError::AnswerOutOfRange {
                question,
                letter: index_letter(index),
                choices: self.answers.len(),
            });
        }

        for (i, answer) in self.answers.iter_mut().enumerate() {
            answer.correct = correct.contains(&i);
        }

        let record = self.serialize();
        self.clear();
        Ok(record)
    }

    pub fn serialize(&self) -> QuestionRecord {
        QuestionRecord {
            question_before: self.before.join(" "),
            question_after: self.after.join(" "),
            question_code: self.code.clone(),
            answers: self.answers.iter().map(AnswerBuilder::serialize).collect(),
        }
    }
}

fn push_fragment(fragments: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        fragments.push(text.to_string());
    }
}

/// Remove the leading whitespace shared by every non-blank line
fn dedent(lines: &[String]) -> Vec<String> {
    let prefix = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .reduce(common_prefix)
        .unwrap_or("");

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.strip_prefix(prefix).unwrap_or(line).to_string()
            }
        })
        .collect()
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..end]
}
