//! Line-based engine
//!
//! Each source line is matched against a fixed set of line patterns and fed straight into
//! a [`QuestionBuilder`]. The patterns are tried in this order:
//!
//! 1. inside a code block: the closing fence, or a code line
//! 2. comments (`--`) and blank lines, which are skipped
//! 3. the opening code fence
//! 4. question start, `N. text`
//! 5. choice, a tab or four spaces then `x. text`
//! 6. continuation, a tab or three spaces then text
//! 7. answer line, `A. (x, y)`, optionally followed by a `--` comment
//!
//! A line matching none of them stops the run with an [`UnrecognizedLineError`].

use crate::quiz::ast::node::{index_letter, letter_index, AnswerSet};
use crate::quiz::ast::span::Position;
use crate::quiz::bank::QuestionBank;
use crate::quiz::building::builder::QuestionBuilder;
use crate::quiz::error::{QuizError, StructuralError, UnrecognizedLineError};
use crate::quiz::lexer::tokens::CODE_FENCE;
use crate::quiz::parsers::ANSWER_INTRODUCER;
use once_cell::sync::Lazy;
use regex::Regex;

static QUESTION_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*(.*)$").unwrap());
static CHOICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\t| {4})([a-z])\.\s*(.*)$").unwrap());
static CONTINUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\t| {3})(.*)$").unwrap());
static ANSWER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^A\.\s*\(\s*([a-z](?:\s*,\s*[a-z])*)\s*\)\s*(?:--.*)?$").unwrap());

/// Classify every line of `source` and collect the finished records
pub fn parse(source: &str) -> Result<QuestionBank, QuizError> {
    let mut engine = LineEngine::default();
    for (index, line) in source.lines().enumerate() {
        engine.line(index, line)?;
    }
    let bank = engine.finish()?;
    tracing::debug!(records = bank.len(), "line-based engine finished");
    Ok(bank)
}

#[derive(Default)]
struct LineEngine {
    bank: QuestionBank,
    builder: QuestionBuilder,
    /// A question line has been seen and its answer line has not
    started: bool,
}

impl LineEngine {
    fn question(&self) -> usize {
        self.bank.len() + 1
    }

    fn line(&mut self, index: usize, line: &str) -> Result<(), QuizError> {
        let state = self.builder.code_block_state();

        if state.open {
            if line.trim() == CODE_FENCE {
                self.builder.close_code();
            } else if ANSWER_INTRODUCER.is_match(line) {
                return Err(self.unterminated().into());
            } else {
                self.builder.push_code(line);
            }
            return Ok(());
        }

        if line.starts_with("--") || line.trim().is_empty() {
            return Ok(());
        }

        if line.trim() == CODE_FENCE {
            if !self.started || state.added || self.builder.choice_count() > 0 {
                return Err(self.unrecognized(index, line).into());
            }
            self.builder.open_code(Some(Position::new(index, 0)));
            return Ok(());
        }

        if let Some(captures) = QUESTION_START.captures(line) {
            if self.started {
                return Err(StructuralError::IncompleteQuestion {
                    question: self.question(),
                }
                .into());
            }
            self.started = true;
            self.builder.push_before(&captures[1]);
            return Ok(());
        }

        if let Some(captures) = CHOICE.captures(line) {
            if !self.started {
                return Err(self.unrecognized(index, line).into());
            }
            let letter = captures[1].chars().next().unwrap_or('?');
            let expected = index_letter(self.builder.choice_count());
            if letter != expected {
                return Err(StructuralError::ChoiceOutOfOrder {
                    question: self.question(),
                    expected,
                    found: letter,
                    position: Position::new(index, captures.get(1).map_or(0, |m| m.start())),
                }
                .into());
            }
            self.builder.push_choice(&captures[2]);
            return Ok(());
        }

        if let Some(captures) = CONTINUATION.captures(line) {
            if !self.started {
                return Err(self.unrecognized(index, line).into());
            }
            if self.builder.choice_count() > 0 {
                self.builder.extend_choice(&captures[1]);
            } else {
                self.builder.push_text(&captures[1]);
            }
            return Ok(());
        }

        if let Some(captures) = ANSWER.captures(line) {
            if !self.started {
                return Err(self.unrecognized(index, line).into());
            }
            let answers: AnswerSet = captures[1]
                .split(',')
                .filter_map(|letter| letter.trim().chars().next())
                .map(letter_index)
                .collect();
            let record = self.builder.finish(self.question(), answers.indices())?;
            self.bank.push(record);
            self.started = false;
            return Ok(());
        }

        Err(self.unrecognized(index, line).into())
    }

    fn finish(self) -> Result<QuestionBank, QuizError> {
        if self.builder.code_block_state().open {
            return Err(self.unterminated().into());
        }
        if self.started || !self.builder.is_empty() {
            return Err(StructuralError::IncompleteQuestion {
                question: self.question(),
            }
            .into());
        }
        Ok(self.bank)
    }

    fn unterminated(&self) -> StructuralError {
        StructuralError::UnterminatedCodeBlock {
            question: self.question(),
            opened_at: self.builder.opened_at(),
        }
    }

    fn unrecognized(&self, index: usize, line: &str) -> UnrecognizedLineError {
        UnrecognizedLineError {
            question: self.question(),
            line: index + 1,
            content: line.to_string(),
            code_block: self.builder.code_block_state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::error::CodeBlockState;

    #[test]
    fn test_simple_question() {
        let bank = parse("1. Is 2+2 equal to 4?\n\ta. yes\n\tb. no\nA. (a)\n").unwrap();
        assert_eq!(bank.len(), 1);
        let record = &bank.records()[0];
        assert_eq!(record.question_before, "Is 2+2 equal to 4?");
        assert_eq!(record.correct_indices(), vec![0]);
    }

    #[test]
    fn test_four_space_choices_and_three_space_continuations() {
        let source = "1. First\n   continued\n    a. one\n    b. two\nA. (a,b)\n";
        let record = parse(source).unwrap().records()[0].clone();
        assert_eq!(record.question_before, "First continued");
        assert_eq!(record.correct_indices(), vec![0, 1]);
    }

    #[test]
    fn test_code_block_splits_before_and_after() {
        let source = "1. Look\n\"\"\"\n\tx = 1\n\n\ty = 2\n\"\"\"\n\tand answer\n\ta. 1\nA. (a)\n";
        let record = parse(source).unwrap().records()[0].clone();
        assert_eq!(record.question_before, "Look");
        assert_eq!(record.question_code, vec!["x = 1", "", "y = 2"]);
        assert_eq!(record.question_after, "and answer");
    }

    #[test]
    fn test_comments_blank_lines_and_crlf() {
        let source = "-- header\r\n\r\n1. Q?\r\n\ta. x\r\nA. (a)\r\n";
        assert_eq!(parse(source).unwrap().len(), 1);
    }

    #[test]
    fn test_unrecognized_line_reports_context() {
        let err = parse("1. Q?\n\ta. x\nnonsense\n").unwrap_err();
        assert_eq!(
            err,
            QuizError::UnrecognizedLine(UnrecognizedLineError {
                question: 1,
                line: 3,
                content: "nonsense".to_string(),
                code_block: CodeBlockState::default(),
            })
        );
    }

    #[test]
    fn test_unterminated_code_block() {
        let err = parse("1. Q?\n\"\"\"\nx\n\ta. y\nA. (a)\n").unwrap_err();
        assert_eq!(
            err,
            QuizError::Structural(StructuralError::UnterminatedCodeBlock {
                question: 1,
                opened_at: Some(Position::new(1, 0)),
            })
        );
    }

    #[test]
    fn test_missing_answer_line() {
        let err = parse("1. Q?\n\ta. x\n").unwrap_err();
        assert_eq!(
            err,
            QuizError::Structural(StructuralError::IncompleteQuestion { question: 1 })
        );
    }

    #[test]
    fn test_choice_continuation() {
        let bank = parse("1. Q?\n\ta. long\n\t   choice\nA. (a)\n").unwrap();
        assert_eq!(bank.records()[0].answers[0].text, "long choice");
    }

    #[test]
    fn test_answer_line_with_trailing_comment() {
        let bank = parse("1. Q?\n\ta. x\n\tb. y\nA. (b) -- second\n").unwrap();
        assert_eq!(bank.records()[0].correct_indices(), vec![1]);

        let err = parse("1. Q?\n\ta. x\nA. (a) trailing\n").unwrap_err();
        assert!(matches!(err, QuizError::UnrecognizedLine(e) if e.line == 3));
    }

    #[test]
    fn test_choice_before_question_is_unrecognized() {
        let err = parse("\ta. x\n").unwrap_err();
        assert!(matches!(err, QuizError::UnrecognizedLine(e) if e.line == 1));
    }
}
