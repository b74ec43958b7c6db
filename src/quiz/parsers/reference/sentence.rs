//! Sentence accumulation
//!
//! A sentence keeps taking words, letters, numbers and symbols until the lookahead can no
//! longer belong to it. Two lookahead guards end it early:
//!
//! - a tab followed by `x.` (lowercase letter, period) opens a choice
//! - an uppercase letter followed by a period opens the answer line
//!
//! Any other tab is a continuation line and is folded into the sentence as a single space.
//!
//! Spacing between the kept tokens follows [`Spacing`]. In the designed mode a space goes
//! between two word-like tokens, and after any token other than a period when a lowercase
//! word follows. Periods abut whatever comes next.

use crate::quiz::ast::node::Sentence;
use crate::quiz::lexer::tokens::{Token, TokenKind};
use crate::quiz::parsers::reference::cursor::TokenCursor;
use crate::quiz::parsers::Spacing;

/// Accumulate one sentence starting at the cursor
pub fn sentence(cursor: &mut TokenCursor<'_>, spacing: Spacing) -> Sentence {
    let mut text = String::new();
    let mut previous: Option<Token> = None;
    let mut continued = false;

    loop {
        let token = cursor.peek();
        match token.kind {
            TokenKind::Tab => {
                if starts_choice(cursor, 0) {
                    break;
                }
                cursor.advance();
                continued = true;
                continue;
            }
            TokenKind::LetterUpper if starts_answer(cursor, 0) => break,
            kind if kind.is_sentence_part() => {}
            _ => break,
        }

        let token = cursor.advance().clone();
        if let Some(previous) = &previous {
            if continued || needs_space(previous, &token, spacing) {
                text.push(' ');
            }
        }
        text.push_str(&token.lexeme);
        previous = Some(token);
        continued = false;
    }

    Sentence::new(text)
}

/// `Tab LetterLower '.'` at `offset`
pub fn starts_choice(cursor: &TokenCursor<'_>, offset: usize) -> bool {
    cursor.peek_at(offset).kind == TokenKind::Tab
        && cursor.peek_at(offset + 1).kind == TokenKind::LetterLower
        && cursor.peek_at(offset + 2).is_period()
}

/// `LetterUpper '.'` at `offset`
pub fn starts_answer(cursor: &TokenCursor<'_>, offset: usize) -> bool {
    cursor.peek_at(offset).kind == TokenKind::LetterUpper && cursor.peek_at(offset + 1).is_period()
}

fn needs_space(current: &Token, next: &Token, spacing: Spacing) -> bool {
    match spacing {
        Spacing::Designed => {
            let between_words = current.kind.is_word_like() && next.kind.is_word_like();
            let before_lowercase = !current.is_period() && next.is_lowercase_word();
            between_words || before_lowercase
        }
        Spacing::Source => current.span.end < next.span.start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::lexer::tokenize;
    use rstest::rstest;

    fn run(source: &str, spacing: Spacing) -> (String, TokenKind) {
        let tokens = tokenize(source).unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        let sentence = sentence(&mut cursor, spacing);
        (sentence.to_string(), cursor.peek().kind)
    }

    #[rstest]
    #[case("What is this", "What is this")]
    #[case("Is 2+2 equal to 4?", "Is2+2 equal to4?")]
    #[case("one, two; three", "one, two; three")]
    #[case("End. Next", "End.Next")]
    #[case("e.g. this", "e.g.this")]
    #[case("Call f(x) now", "Call f( x) now")]
    #[case("I am", "I am")]
    fn test_designed_spacing(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(run(source, Spacing::Designed).0, expected);
    }

    #[rstest]
    #[case("Is 2+2 equal to 4?", "Is 2+2 equal to 4?")]
    #[case("End. Next", "End. Next")]
    #[case("Call f(x)  now", "Call f(x) now")]
    fn test_source_spacing(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(run(source, Spacing::Source).0, expected);
    }

    #[test]
    fn test_stops_before_choice() {
        let (text, next) = run("Pick one\n\ta. yes", Spacing::Designed);
        assert_eq!(text, "Pick one");
        assert_eq!(next, TokenKind::Tab);
    }

    #[test]
    fn test_stops_before_answer_introducer() {
        let (text, next) = run("last choice\nA. (a)", Spacing::Designed);
        assert_eq!(text, "last choice");
        assert_eq!(next, TokenKind::LetterUpper);
    }

    #[test]
    fn test_uppercase_letter_without_period_is_kept() {
        let (text, _) = run("Plan B is fine", Spacing::Designed);
        assert_eq!(text, "Plan B is fine");
    }

    #[test]
    fn test_tab_continuation_is_folded() {
        let (text, next) = run("First part\n\tsecond part\n\ta. x", Spacing::Designed);
        assert_eq!(text, "First part second part");
        assert_eq!(next, TokenKind::Tab);
    }

    #[test]
    fn test_three_space_continuation_is_folded() {
        let (text, _) = run("First part\n   second part", Spacing::Source);
        assert_eq!(text, "First part second part");
    }

    #[test]
    fn test_stops_at_code_fence() {
        let (text, next) = run("Look:\n\"\"\"\nx\n\"\"\"", Spacing::Designed);
        assert_eq!(text, "Look:");
        assert_eq!(next, TokenKind::CodeFence);
    }

    #[test]
    fn test_empty_sentence() {
        let (text, next) = run("\ta. x", Spacing::Designed);
        assert_eq!(text, "");
        assert_eq!(next, TokenKind::Tab);
    }
}
