//! Grammar productions
//!
//! ```text
//! bank           := question_block* EndMarker
//! question_block := question_id sentence [code_block sentence] choice* answer_set
//! question_id    := Number '.'
//! code_block     := CodeFence CodeLine* CodeFence
//! choice         := Tab LetterLower '.' sentence
//! answer_set     := 'A' '.' '(' LetterLower (',' LetterLower)* ')'
//! ```
//!
//! Every token a production requires is taken through [`TokenCursor::consume`], so a
//! mismatch always reports the production, what it wanted and what it got.

use crate::quiz::ast::node::{
    index_letter, letter_index, AnswerSet, ChoiceId, ChoiceStatement, QuestionBlock, QuestionId,
    Sentence,
};
use crate::quiz::ast::span::Position;
use crate::quiz::error::{Expect, QuizError, StructuralError};
use crate::quiz::lexer::tokens::{Token, TokenKind};
use crate::quiz::parsers::reference::cursor::TokenCursor;
use crate::quiz::parsers::reference::sentence::sentence;
use crate::quiz::parsers::{Spacing, ANSWER_INTRODUCER};

const PERIOD: Expect = Expect::Exact(TokenKind::Symbol, ".");

/// How many leftover tokens to show when the input is not fully consumed
const PREVIEW_LIMIT: usize = 8;

pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    spacing: Spacing,
    /// One-based position of the block being parsed
    question: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], spacing: Spacing) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            spacing,
            question: 0,
        }
    }

    /// Parse every question block, then require that only the end marker is left
    pub fn parse(mut self) -> Result<Vec<QuestionBlock>, QuizError> {
        let mut blocks = Vec::new();

        while self.cursor.peek().kind == TokenKind::Number {
            blocks.push(self.question_block()?);
        }

        let rest = self.cursor.peek();
        if rest.kind != TokenKind::EndMarker {
            return Err(StructuralError::UnconsumedTokens {
                position: rest.position,
                preview: self.cursor.preview(PREVIEW_LIMIT),
            }
            .into());
        }

        Ok(blocks)
    }

    fn question_block(&mut self) -> Result<QuestionBlock, QuizError> {
        self.question += 1;

        let id = self.question_id()?;
        let statement = sentence(&mut self.cursor, self.spacing);

        let (code_opened_at, code, trailing) =
            if self.cursor.peek().kind == TokenKind::CodeFence {
                let (opened_at, code) = self.code_block()?;
                (Some(opened_at), code, sentence(&mut self.cursor, self.spacing))
            } else {
                (None, Vec::new(), Sentence::default())
            };

        let mut choices = Vec::new();
        while self.cursor.peek().kind == TokenKind::Tab {
            let choice = self.choice(choices.len())?;
            choices.push(choice);
        }

        let answers = self.answer_set()?;

        Ok(QuestionBlock {
            id,
            statement,
            code_opened_at,
            code,
            trailing,
            choices,
            answers,
        })
    }

    fn question_id(&mut self) -> Result<QuestionId, QuizError> {
        let number = self.cursor.consume("question_id", TokenKind::Number)?;
        let period = self.cursor.consume("question_id", PERIOD)?;
        Ok(QuestionId::new(number, period))
    }

    fn code_block(&mut self) -> Result<(Position, Vec<String>), QuizError> {
        let open = self.cursor.consume("code_block", TokenKind::CodeFence)?;
        let unterminated = StructuralError::UnterminatedCodeBlock {
            question: self.question,
            opened_at: Some(open.position),
        };

        let mut lines = Vec::new();
        loop {
            let token = self.cursor.peek();
            match token.kind {
                TokenKind::CodeLine if ANSWER_INTRODUCER.is_match(&token.lexeme) => {
                    return Err(unterminated.into());
                }
                TokenKind::CodeLine => {
                    lines.push(token.lexeme.clone());
                    self.cursor.advance();
                }
                TokenKind::EndMarker => return Err(unterminated.into()),
                _ => {
                    self.cursor.consume("code_block", TokenKind::CodeFence)?;
                    break;
                }
            }
        }

        Ok((open.position, lines))
    }

    fn choice(&mut self, index: usize) -> Result<ChoiceStatement, QuizError> {
        self.cursor.consume("choice", TokenKind::Tab)?;
        let letter = self.cursor.consume("choice", TokenKind::LetterLower)?;
        let period = self.cursor.consume("choice", PERIOD)?;
        let id = ChoiceId::new(letter, period);

        let expected = index_letter(index);
        if id.letter() != expected {
            return Err(StructuralError::ChoiceOutOfOrder {
                question: self.question,
                expected,
                found: id.letter(),
                position: id.letter.position,
            }
            .into());
        }

        let statement = sentence(&mut self.cursor, self.spacing);
        Ok(ChoiceStatement { id, statement })
    }

    fn answer_set(&mut self) -> Result<AnswerSet, QuizError> {
        self.cursor
            .consume("answer_set", Expect::Exact(TokenKind::LetterUpper, "A"))?;
        self.cursor.consume("answer_set", PERIOD)?;
        self.cursor
            .consume("answer_set", Expect::Exact(TokenKind::Symbol, "("))?;

        let mut answers = AnswerSet::new();
        loop {
            let letter = self.cursor.consume("answer_letter", TokenKind::LetterLower)?;
            answers.insert(letter.lexeme.chars().next().map(letter_index).unwrap_or(0));

            if self.cursor.check(Expect::Exact(TokenKind::Symbol, ",")) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        self.cursor
            .consume("answer_set", Expect::Exact(TokenKind::Symbol, ")"))?;
        Ok(answers)
    }
}
