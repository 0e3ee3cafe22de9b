//! Normal/insert mode switching
//!
//! In normal mode the engine owns the host's type events; in insert mode they
//! go straight to the host. Switching mode publishes the `bext.normal` context
//! key, restyles the cursor and cancels any selection.

use std::fmt;

use crate::editor::{CursorStyle, TextEditor};
use crate::error::Result;
use crate::host::{Host, TypeSubscription};
use crate::selection::SelectionTracker;

/// Context key published on every mode change
pub const NORMAL_CONTEXT: &str = "bext.normal";

/// Editing mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Keys resolve against the keymap
    #[default]
    Normal,
    /// Keys insert text
    Insert,
}

impl Mode {
    pub fn is_normal(self) -> bool {
        self == Mode::Normal
    }

    /// Cursor glyph shown while in this mode
    pub fn cursor_style(self) -> CursorStyle {
        match self {
            Mode::Normal => CursorStyle::Block,
            Mode::Insert => CursorStyle::Underline,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::Insert => write!(f, "insert"),
        }
    }
}

/// Owner of the mode flag and the type interceptor subscription
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
    subscription: Option<TypeSubscription>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether type events are routed to the engine
    pub fn is_intercepting(&self) -> bool {
        self.subscription.is_some()
    }

    /// Arm type interception (once) and switch to normal mode
    pub fn enter_normal<H: Host>(&mut self, host: &mut H, tracker: &mut SelectionTracker) -> Result<()> {
        if self.subscription.is_none() {
            self.subscription = Some(host.register_type_interceptor());
        }
        self.set_mode(Mode::Normal, host, tracker)
    }

    /// Release type interception and switch to insert mode
    pub fn enter_insert<H: Host>(&mut self, host: &mut H, tracker: &mut SelectionTracker) -> Result<()> {
        if let Some(subscription) = self.subscription.take() {
            host.dispose_type_interceptor(subscription);
        }
        self.set_mode(Mode::Insert, host, tracker)
    }

    /// Apply `mode` to the active editor
    ///
    /// Does nothing at all when no editor is active; the flag keeps its old
    /// value in that case.
    pub fn set_mode<H: Host>(
        &mut self,
        mode: Mode,
        host: &mut H,
        tracker: &mut SelectionTracker,
    ) -> Result<()> {
        if host.active_editor().is_none() {
            tracing::debug!(%mode, "No active editor, mode unchanged");
            return Ok(());
        }

        host.set_context(NORMAL_CONTEXT, mode.is_normal())?;
        self.mode = mode;
        if let Some(editor) = host.active_editor_mut() {
            editor.set_cursor_style(mode.cursor_style());
        }
        tracing::info!(%mode, "Mode changed");

        tracker.cancel(host)
    }

    /// Re-apply the current cursor style to one editor
    pub fn update_cursor<E: TextEditor>(&self, editor: Option<&mut E>) {
        if let Some(editor) = editor {
            editor.set_cursor_style(self.mode.cursor_style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::editor::{EditorId, Position, Selection};
    use crate::host::{ScratchEditor, ScratchHost};
    use crate::selection::CANCEL_SELECTION;

    fn host() -> ScratchHost {
        ScratchHost::new(Settings::new()).with_editor(ScratchEditor::new(EditorId(1)))
    }

    #[test]
    fn test_enter_normal_installs_interceptor_once() {
        let mut host = host();
        let mut tracker = SelectionTracker::new();
        let mut modes = ModeController::new();

        modes.enter_normal(&mut host, &mut tracker).unwrap();
        modes.enter_normal(&mut host, &mut tracker).unwrap();

        assert!(modes.is_intercepting());
        assert_eq!(host.interceptors_installed(), 1);
        assert_eq!(host.context(NORMAL_CONTEXT), Some(true));
        assert_eq!(
            host.active_editor().and_then(|e| e.cursor_style()),
            Some(CursorStyle::Block)
        );
    }

    #[test]
    fn test_enter_insert_disposes_interceptor() {
        let mut host = host();
        let mut tracker = SelectionTracker::new();
        let mut modes = ModeController::new();

        modes.enter_normal(&mut host, &mut tracker).unwrap();
        modes.enter_insert(&mut host, &mut tracker).unwrap();

        assert!(!modes.is_intercepting());
        assert!(!host.is_intercepting());
        assert_eq!(modes.mode(), Mode::Insert);
        assert_eq!(host.context(NORMAL_CONTEXT), Some(false));
        assert_eq!(
            host.active_editor().and_then(|e| e.cursor_style()),
            Some(CursorStyle::Underline)
        );
    }

    #[test]
    fn test_set_mode_cancels_selection() {
        let editor = ScratchEditor::new(EditorId(1)).with_selections(vec![Selection::new(
            Position::new(1, 0),
            Position::new(1, 5),
        )]);
        let mut host = ScratchHost::new(Settings::new()).with_editor(editor);
        let mut tracker = SelectionTracker::new();
        let mut modes = ModeController::new();

        modes.enter_insert(&mut host, &mut tracker).unwrap();
        assert_eq!(host.executed(), [CANCEL_SELECTION.to_string()]);
        assert!(!SelectionTracker::has_real_selection(host.active_editor()));
    }

    #[test]
    fn test_set_mode_without_editor_is_noop() {
        let mut host = ScratchHost::new(Settings::new());
        let mut tracker = SelectionTracker::new();
        let mut modes = ModeController::new();

        modes.enter_insert(&mut host, &mut tracker).unwrap();

        assert_eq!(modes.mode(), Mode::Normal);
        assert_eq!(host.context(NORMAL_CONTEXT), None);
        assert!(host.executed().is_empty());
    }
}
