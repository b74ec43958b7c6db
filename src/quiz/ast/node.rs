//! AST node types for parsed questions
//!
//! One [`QuestionBlock`] is produced per question. Identifiers keep the tokens they were
//! parsed from so diagnostics can point back at the source.

use crate::quiz::ast::span::Position;
use crate::quiz::lexer::tokens::Token;
use std::fmt;

/// The `N.` prefix of a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionId {
    pub number: Token,
    pub period: Token,
}

impl QuestionId {
    pub fn new(number: Token, period: Token) -> Self {
        Self { number, period }
    }

    /// The number as written, if it fits in a usize
    pub fn value(&self) -> Option<usize> {
        self.number.lexeme.parse().ok()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number.lexeme, self.period.lexeme)
    }
}

/// The `a.` prefix of a choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceId {
    pub letter: Token,
    pub period: Token,
}

impl ChoiceId {
    pub fn new(letter: Token, period: Token) -> Self {
        Self { letter, period }
    }

    pub fn letter(&self) -> char {
        self.letter.lexeme.chars().next().unwrap_or('?')
    }

    /// Zero-based index implied by the letter (`a` is 0)
    pub fn index(&self) -> usize {
        letter_index(self.letter())
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.lexeme, self.period.lexeme)
    }
}

/// Prose rebuilt from word and symbol tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence(String);

impl Sentence {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceStatement {
    pub id: ChoiceId,
    pub statement: Sentence,
}

impl fmt::Display for ChoiceStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.statement)
    }
}

/// Zero-based indices of the correct choices, in the order they were listed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    indices: Vec<usize>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an index, ignoring repeats
    pub fn insert(&mut self, index: usize) {
        if !self.indices.contains(&index) {
            self.indices.push(index);
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl FromIterator<usize> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl fmt::Display for AnswerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: Vec<String> = self
            .indices
            .iter()
            .map(|&i| index_letter(i).to_string())
            .collect();
        write!(f, "({})", letters.join(","))
    }
}

/// The AST root for one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    pub id: QuestionId,
    pub statement: Sentence,
    /// Position of the opening fence, when the question has code
    pub code_opened_at: Option<Position>,
    /// Raw code lines, exactly as they appeared between the fences
    pub code: Vec<String>,
    pub trailing: Sentence,
    pub choices: Vec<ChoiceStatement>,
    pub answers: AnswerSet,
}

impl fmt::Display for QuestionBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} number of choices: {}", self.id, self.choices.len())
    }
}

/// `a` -> 0, `b` -> 1, ...
pub fn letter_index(letter: char) -> usize {
    (letter as u32).saturating_sub('a' as u32) as usize
}

/// 0 -> `a`, 1 -> `b`, ...
pub fn index_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'a'.checked_add(i))
        .map(char::from)
        .unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::lexer::tokens::TokenKind;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 0..lexeme.len(), Position::default())
    }

    #[test]
    fn test_letter_index_round_trip() {
        assert_eq!(letter_index('a'), 0);
        assert_eq!(letter_index('e'), 4);
        assert_eq!(index_letter(0), 'a');
        assert_eq!(index_letter(25), 'z');
    }

    #[test]
    fn test_answer_set_ignores_repeats() {
        let set: AnswerSet = vec![2, 0, 2].into_iter().collect();
        assert_eq!(set.indices(), &[2, 0]);
        assert_eq!(set.to_string(), "(c,a)");
    }

    #[test]
    fn test_ids_display_as_written() {
        let qid = QuestionId::new(token(TokenKind::Number, "12"), token(TokenKind::Symbol, "."));
        assert_eq!(qid.to_string(), "12.");
        assert_eq!(qid.value(), Some(12));

        let cid = ChoiceId::new(
            token(TokenKind::LetterLower, "c"),
            token(TokenKind::Symbol, "."),
        );
        assert_eq!(cid.to_string(), "c.");
        assert_eq!(cid.index(), 2);
    }

    #[test]
    fn test_block_display_counts_choices() {
        let period = token(TokenKind::Symbol, ".");
        let block = QuestionBlock {
            id: QuestionId::new(token(TokenKind::Number, "1"), period.clone()),
            statement: Sentence::new("Pick one?"),
            code_opened_at: Some(Position::new(1, 0)),
            code: vec!["x = 1".to_string()],
            trailing: Sentence::default(),
            choices: vec![
                ChoiceStatement {
                    id: ChoiceId::new(token(TokenKind::LetterLower, "a"), period.clone()),
                    statement: Sentence::new("yes"),
                },
                ChoiceStatement {
                    id: ChoiceId::new(token(TokenKind::LetterLower, "b"), period),
                    statement: Sentence::new("no"),
                },
            ],
            answers: vec![1].into_iter().collect(),
        };

        assert_eq!(block.to_string(), "1. number of choices: 2");
    }
}
