//! Implementation of the quiz lexer
//!
//! The source is walked line by line. Ordinary lines are handed to the logos lexer and
//! their spans are shifted back to absolute offsets. A line whose trimmed content is the
//! code fence toggles code mode, and while code mode is on every line is captured whole
//! as a single [`TokenKind::CodeLine`] without any classification.

use crate::quiz::ast::span::Position;
use crate::quiz::error::LexError;
use crate::quiz::lexer::tokens::{RawToken, Token, TokenKind, CODE_FENCE};
use logos::Logos;

/// Tokenize a complete quiz source, appending the end marker
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut in_code = false;
    let mut line_start = 0;
    let mut end_position = Position::default();

    for (line_no, raw_line) in source.split_inclusive('\n').enumerate() {
        let line = raw_line.strip_suffix('\n').unwrap_or(raw_line);
        let span = line_start..line_start + line.len();

        if line.trim() == CODE_FENCE {
            let indent = line.len() - line.trim_start().len();
            tokens.push(Token::new(
                TokenKind::CodeFence,
                CODE_FENCE,
                span,
                Position::new(line_no, indent),
            ));
            in_code = !in_code;
        } else if in_code {
            tokens.push(Token::new(
                TokenKind::CodeLine,
                line,
                span,
                Position::new(line_no, 0),
            ));
        } else {
            tokenize_line(line, line_start, line_no, &mut tokens)?;
        }

        line_start += raw_line.len();
        end_position = if raw_line.ends_with('\n') {
            Position::new(line_no + 1, 0)
        } else {
            Position::new(line_no, line.len())
        };
    }

    let end = source.len();
    tokens.push(Token::new(
        TokenKind::EndMarker,
        "",
        end..end,
        end_position,
    ));

    Ok(tokens)
}

fn tokenize_line(
    line: &str,
    line_start: usize,
    line_no: usize,
    tokens: &mut Vec<Token>,
) -> Result<(), LexError> {
    let mut lexer = RawToken::lexer(line);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let absolute = line_start + span.start..line_start + span.end;
        let position = Position::new(line_no, span.start);

        match result {
            Ok(raw) => tokens.push(Token::from_raw(raw, lexer.slice(), absolute, position)),
            Err(()) => {
                let character = line[span.start..].chars().next().unwrap_or('\u{fffd}');
                return Err(LexError::new(character, absolute.start, position));
            }
        }
    }

    Ok(())
}
