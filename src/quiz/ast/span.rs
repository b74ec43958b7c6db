//! Positions in quiz source
//!
//! Positions are stored zero-based and displayed one-based, which is what
//! editors and humans expect to see in a diagnostic.

use serde::Serialize;
use std::fmt;

/// A position in quiz source (line and column, both zero-based)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}
