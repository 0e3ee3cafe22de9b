//! The engine's own named commands
//!
//! Bindings refer to these by id (`bext.moveDown`) exactly like host commands.
//! The session dispatches them internally; everything else goes to the host.

use std::fmt;
use std::str::FromStr;

use crate::editor::{Position, Range, RevealType, Selection, TextEditor};
use crate::error::{Error, Result};
use crate::host::Host;
use crate::selection::SelectionTracker;

/// Lines scrolled by `bext.moveDown` / `bext.moveUp`
pub const PAGE_LINES: isize = 10;

/// Distance kept between a moved cursor and the viewport edge
pub const PAGE_BUFFER: usize = 1;

/// Identifies one of the engine's commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    EnterNormal,
    EnterInsert,
    ToggleSelection,
    MoveDown,
    MoveUp,
    SwapActiveAndAnchor,
    CopyWord,
    CancelSelection,
}

impl CommandId {
    pub const ALL: [CommandId; 8] = [
        CommandId::EnterNormal,
        CommandId::EnterInsert,
        CommandId::ToggleSelection,
        CommandId::MoveDown,
        CommandId::MoveUp,
        CommandId::SwapActiveAndAnchor,
        CommandId::CopyWord,
        CommandId::CancelSelection,
    ];

    /// The id bindings use for this command
    pub fn name(self) -> &'static str {
        match self {
            CommandId::EnterNormal => "bext.enterNormal",
            CommandId::EnterInsert => "bext.enterInsert",
            CommandId::ToggleSelection => "bext.toggleSelection",
            CommandId::MoveDown => "bext.moveDown",
            CommandId::MoveUp => "bext.moveUp",
            CommandId::SwapActiveAndAnchor => "bext.swapActiveAndAnchor",
            CommandId::CopyWord => "bext.copyWord",
            CommandId::CancelSelection => "bext.cancelSelection",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommandId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CommandId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| Error::UnknownCommand(s.to_string()))
    }
}

/// Scroll the viewport by `lines` and pull the cursor back inside it
///
/// The cursor lands one line inside the new viewport edge, at column 0. The
/// anchor stays put while selecting, otherwise it follows the cursor.
pub fn move_by<H: Host>(host: &mut H, tracker: &SelectionTracker, lines: isize) -> Result<()> {
    let editor = host.active_editor_mut().ok_or(Error::NoActiveEditor)?;
    let visible = *editor.visible_ranges().first().ok_or(Error::NoVisibleRange)?;

    let start = visible.start.shift_lines(lines);
    let end = visible.end.shift_lines(lines);
    editor.reveal_range(Range::new(start, end), RevealType::Default);

    let current = editor.selection();
    if current.active < start {
        let target = Position::new(start.line + PAGE_BUFFER, 0);
        place_cursor(editor, tracker, target);
    }

    let current = editor.selection();
    if current.active > end {
        let target = Position::new(end.line.saturating_sub(PAGE_BUFFER), 0);
        place_cursor(editor, tracker, target);
    }

    tracing::debug!(lines, start = start.line, end = end.line, "Moved viewport");
    Ok(())
}

fn place_cursor<E: TextEditor>(editor: &mut E, tracker: &SelectionTracker, target: Position) {
    let anchor = if tracker.is_selecting(Some(&*editor)) {
        editor.selection().anchor
    } else {
        target
    };
    editor.set_selection(Selection::new(anchor, target));
}

/// Exchange anchor and active end of every selection
pub fn swap_active_and_anchor<H: Host>(host: &mut H) -> Result<()> {
    let editor = host.active_editor_mut().ok_or(Error::NoActiveEditor)?;
    let swapped = editor.selections().iter().map(|s| s.swapped()).collect();
    editor.set_selections(swapped);

    let active = editor.selection().active;
    editor.reveal_range(Range::empty(active), RevealType::Default);
    Ok(())
}

/// Copy the word under the cursor without disturbing the selections
///
/// If either host command fails the selections are not restored.
pub fn copy_word<H: Host>(host: &mut H) -> Result<()> {
    let editor = host.active_editor().ok_or(Error::NoActiveEditor)?;
    let id = editor.id();
    let saved = editor.selections().to_vec();

    host.execute_command("editor.action.addSelectionToNextFindMatch")?;
    host.execute_command("editor.action.clipboardCopyAction")?;

    if let Some(editor) = host.editor_mut(id) {
        editor.set_selections(saved);
    }
    Ok(())
}
