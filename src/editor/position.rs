//! Position and range types shared with the host editor.

/// A position in a document (line and column, both 0-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Same column, different line
    pub const fn with_line(self, line: usize) -> Self {
        Self {
            line,
            column: self.column,
        }
    }

    /// Shift the line by a signed amount, clamping at the first line
    pub const fn shift_lines(self, delta: isize) -> Self {
        self.with_line(self.line.saturating_add_signed(delta))
    }
}

/// A span between two positions, `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range, ordering the endpoints
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A zero-width range at `pos`
    pub const fn empty(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Line-based constructor, both columns at 0
    pub const fn lines(start: usize, end: usize) -> Self {
        Self {
            start: Position::new(start, 0),
            end: Position::new(end, 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
