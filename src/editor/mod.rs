//! Text editor surface consumed by the engine
//!
//! The engine never touches document text. It only reads selection and
//! viewport geometry and asks the host to reveal ranges or restyle the cursor.

mod position;
mod selection;

pub use position::{Position, Range};
pub use selection::Selection;

/// Identifies one editor pane in the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(pub u32);

/// Cursor glyph requested for an editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorStyle {
    /// Normal mode
    Block,
    /// Insert mode
    Underline,
}

/// How the host should scroll a range into view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealType {
    /// Scroll as little as possible
    #[default]
    Default,
}

/// A single editor pane as exposed by the host
pub trait TextEditor {
    fn id(&self) -> EditorId;

    /// All selections, primary first
    fn selections(&self) -> &[Selection];

    fn set_selections(&mut self, selections: Vec<Selection>);

    /// Currently visible line spans, top to bottom
    fn visible_ranges(&self) -> &[Range];

    fn reveal_range(&mut self, range: Range, reveal: RevealType);

    fn set_cursor_style(&mut self, style: CursorStyle);

    /// The primary selection
    fn selection(&self) -> Selection {
        self.selections().first().copied().unwrap_or_default()
    }

    /// Replace all selections with a single one
    fn set_selection(&mut self, selection: Selection) {
        self.set_selections(vec![selection]);
    }

    /// Whether any selection spans text
    fn has_selection(&self) -> bool {
        self.selections().iter().any(|s| !s.is_empty())
    }
}
