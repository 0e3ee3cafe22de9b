//! Selection-state tracking
//!
//! "Selecting" is true while the active editor has a real (non-empty)
//! selection, or while the synthetic zero-width flag is on. The flag lets
//! branch bindings extend from a collapsed cursor after
//! `bext.toggleSelection`, and is cleared as soon as a real selection exists
//! so it cannot outlive one.

use crate::editor::TextEditor;
use crate::error::Result;
use crate::host::Host;

/// Host command that collapses the current selection
pub const CANCEL_SELECTION: &str = "cancelSelection";

/// Owner of the zero-width selecting flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    zero_width_selecting: bool,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zero_width_selecting(&self) -> bool {
        self.zero_width_selecting
    }

    /// Whether the editor has any selection with distinct anchor and active ends
    ///
    /// Without an editor there is no real selection.
    pub fn has_real_selection<E: TextEditor>(editor: Option<&E>) -> bool {
        editor.is_some_and(|editor| editor.has_selection())
    }

    /// Real selection or the synthetic flag
    pub fn is_selecting<E: TextEditor>(&self, editor: Option<&E>) -> bool {
        Self::has_real_selection(editor) || self.zero_width_selecting
    }

    /// Clear the synthetic flag once a real selection exists
    ///
    /// Runs once per key, before resolution.
    pub fn adjust<E: TextEditor>(&mut self, editor: Option<&E>) {
        if Self::has_real_selection(editor) {
            if self.zero_width_selecting {
                tracing::debug!("Real selection present, clearing zero-width selecting");
            }
            self.zero_width_selecting = false;
        }
    }

    /// Collapse the selection in the host and clear the synthetic flag
    pub fn cancel<H: Host>(&mut self, host: &mut H) -> Result<()> {
        host.execute_command(CANCEL_SELECTION)?;
        self.zero_width_selecting = false;
        Ok(())
    }

    /// Cancel any selection, then flip the synthetic flag from its prior value
    pub fn toggle<H: Host>(&mut self, host: &mut H) -> Result<()> {
        let was_selecting = self.zero_width_selecting;
        self.cancel(host)?;
        self.zero_width_selecting = !was_selecting;
        tracing::debug!(
            zero_width_selecting = self.zero_width_selecting,
            "Toggled selection"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::editor::{EditorId, Position, Selection};
    use crate::host::{ScratchEditor, ScratchHost};

    fn host_with_selection(selection: Selection) -> ScratchHost {
        let mut editor = ScratchEditor::new(EditorId(1));
        editor.set_selections(vec![selection]);
        ScratchHost::new(Settings::new()).with_editor(editor)
    }

    fn collapsed() -> Selection {
        Selection::collapsed(Position::new(3, 4))
    }

    fn spanning() -> Selection {
        Selection::new(Position::new(3, 0), Position::new(3, 4))
    }

    #[test]
    fn test_real_selection_clears_flag() {
        let mut host = host_with_selection(collapsed());
        let mut tracker = SelectionTracker::new();
        tracker.toggle(&mut host).unwrap();
        assert!(tracker.zero_width_selecting());

        let host = host_with_selection(spanning());
        tracker.adjust(host.active_editor());
        assert!(!tracker.zero_width_selecting());
        // Still selecting through the real selection
        assert!(tracker.is_selecting(host.active_editor()));
    }

    #[test]
    fn test_flag_survives_without_real_selection() {
        let mut host = host_with_selection(collapsed());
        let mut tracker = SelectionTracker::new();
        tracker.toggle(&mut host).unwrap();

        tracker.adjust(host.active_editor());
        assert!(tracker.zero_width_selecting());
        assert!(tracker.is_selecting(host.active_editor()));
    }

    #[test]
    fn test_toggle_flips_and_cancels() {
        let mut host = host_with_selection(spanning());
        let mut tracker = SelectionTracker::new();

        tracker.toggle(&mut host).unwrap();
        assert!(tracker.zero_width_selecting());
        assert!(!SelectionTracker::has_real_selection(host.active_editor()));
        assert_eq!(host.executed(), [CANCEL_SELECTION.to_string()]);

        tracker.toggle(&mut host).unwrap();
        assert!(!tracker.zero_width_selecting());
    }

    #[test]
    fn test_cancel_clears_flag() {
        let mut host = host_with_selection(collapsed());
        let mut tracker = SelectionTracker::new();
        tracker.toggle(&mut host).unwrap();

        tracker.cancel(&mut host).unwrap();
        assert!(!tracker.zero_width_selecting());
        assert!(!tracker.is_selecting(host.active_editor()));
    }

    #[test]
    fn test_failed_cancel_leaves_flag() {
        let mut host = host_with_selection(collapsed());
        let mut tracker = SelectionTracker::new();
        tracker.toggle(&mut host).unwrap();

        host.fail_command(CANCEL_SELECTION);
        assert!(tracker.cancel(&mut host).is_err());
        assert!(tracker.zero_width_selecting());
    }

    #[test]
    fn test_no_editor_is_not_selecting() {
        let host = ScratchHost::new(Settings::new());
        let mut tracker = SelectionTracker::new();
        tracker.adjust(host.active_editor());
        assert!(!tracker.is_selecting(host.active_editor()));
    }
}
