use serde::{Deserialize, Serialize};

/// Represents a position in a text document using 0-based line and character indices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Builds a position from the 1-based line and column shown to users.
    /// Zero is clamped to the first line or column.
    pub fn from_one_based(line: u32, column: u32) -> Self {
        Self {
            line: line.saturating_sub(1),
            character: column.saturating_sub(1),
        }
    }

    /// The 1-based `(line, column)` shown to users, saturating at `u32::MAX`.
    pub fn one_based(&self) -> (u32, u32) {
        (self.line.saturating_add(1), self.character.saturating_add(1))
    }
}
