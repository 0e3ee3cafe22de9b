//! Selection type as reported by the host editor.

use super::position::{Position, Range};

/// A text selection with anchor (start point) and active end (cursor position).
/// The anchor stays fixed while the active end moves during selection extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Where the cursor is (moving point)
    pub active: Position,
}

impl Selection {
    pub const fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// Create a collapsed selection (cursor with no selection)
    pub const fn collapsed(pos: Position) -> Self {
        Self {
            anchor: pos,
            active: pos,
        }
    }

    /// Check if selection is empty (anchor == active)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Check if selection is reversed (active before anchor)
    pub fn is_reversed(&self) -> bool {
        self.active < self.anchor
    }

    /// Same endpoints, roles exchanged
    pub const fn swapped(self) -> Self {
        Self {
            anchor: self.active,
            active: self.anchor,
        }
    }

    /// Collapse selection to the active position
    pub fn collapse(&mut self) {
        self.anchor = self.active;
    }

    /// The covered span, start before end
    pub fn range(&self) -> Range {
        Range::new(self.anchor, self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(Position::new(1, 5));
        assert!(sel.is_empty());
        assert_eq!(sel.anchor, sel.active);
    }

    #[test]
    fn test_selection_swapped() {
        let sel = Selection::new(Position::new(0, 0), Position::new(2, 3));
        assert!(!sel.is_reversed());

        let swapped = sel.swapped();
        assert_eq!(swapped.anchor, Position::new(2, 3));
        assert_eq!(swapped.active, Position::new(0, 0));
        assert!(swapped.is_reversed());
        assert_eq!(swapped.range(), sel.range());
    }

    #[test]
    fn test_selection_collapse() {
        let mut sel = Selection::new(Position::new(0, 0), Position::new(0, 10));
        sel.collapse();
        assert!(sel.is_empty());
        assert_eq!(sel.active, Position::new(0, 10));
    }
}
