//! Index cursor over an immutable token buffer
//!
//! The cursor only moves forward. Looking past the end of the buffer yields the end
//! marker, so productions never have to special-case running out of tokens.

use crate::quiz::error::{Expect, ParseError};
use crate::quiz::lexer::tokens::{Token, TokenKind};

pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    index: usize,
    end: Token,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = match tokens.last() {
            Some(last) if last.kind == TokenKind::EndMarker => last.clone(),
            Some(last) => Token::new(
                TokenKind::EndMarker,
                "",
                last.span.end..last.span.end,
                last.position,
            ),
            None => Token::new(TokenKind::EndMarker, "", 0..0, Default::default()),
        };
        Self {
            tokens,
            index: 0,
            end,
        }
    }

    /// The next unconsumed token
    pub fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// The token `n` places after the next unconsumed one
    pub fn peek_at(&self, n: usize) -> &Token {
        self.tokens.get(self.index + n).unwrap_or(&self.end)
    }

    pub fn check(&self, expect: Expect) -> bool {
        expect.matches(self.peek())
    }

    /// Move past the next token and return it
    pub fn advance(&mut self) -> &Token {
        let index = self.index;
        if index < self.tokens.len() {
            self.index += 1;
        }
        self.tokens.get(index).unwrap_or(&self.end)
    }

    /// Take the next token if it matches, otherwise fail on behalf of `production`
    pub fn consume(
        &mut self,
        production: &'static str,
        expect: impl Into<Expect>,
    ) -> Result<Token, ParseError> {
        let expect = expect.into();
        let token = self.peek();
        if !expect.matches(token) {
            return Err(ParseError::unexpected(production, expect, token));
        }
        Ok(self.advance().clone())
    }

    pub fn position(&self) -> usize {
        self.index
    }

    /// Render up to `limit` unconsumed tokens for diagnostics
    pub fn preview(&self, limit: usize) -> String {
        let rest = &self.tokens[self.index.min(self.tokens.len())..];
        let mut shown: Vec<String> = rest.iter().take(limit).map(|t| t.to_string()).collect();
        if rest.len() > limit {
            shown.push("...".to_string());
        }
        shown.join(" ")
    }
}
