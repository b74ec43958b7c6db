//! Serialized question records
//!
//! This is the exact shape the quiz runner reads back. Answers are written as two element
//! arrays, `["choice text", true]`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question_before: String,
    pub question_after: String,
    pub question_code: Vec<String>,
    pub answers: Vec<AnswerRecord>,
}

impl QuestionRecord {
    /// Zero-based indices of the correct answers
    pub fn correct_indices(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.correct)
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, bool)", into = "(String, bool)")]
pub struct AnswerRecord {
    pub text: String,
    pub correct: bool,
}

impl AnswerRecord {
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            text: text.into(),
            correct,
        }
    }
}

impl From<(String, bool)> for AnswerRecord {
    fn from((text, correct): (String, bool)) -> Self {
        Self { text, correct }
    }
}

impl From<AnswerRecord> for (String, bool) {
    fn from(answer: AnswerRecord) -> Self {
        (answer.text, answer.correct)
    }
}
