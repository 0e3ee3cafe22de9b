//! In-memory host
//!
//! Records every command, context key and typed string instead of driving a
//! real editor. Backs the `bext replay` subcommand and the test suite.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

use super::{Host, TypeSubscription};
use crate::config::Settings;
use crate::editor::{CursorStyle, EditorId, Position, Range, RevealType, Selection, TextEditor};
use crate::error::{Error, Result};
use crate::selection::CANCEL_SELECTION;

/// Lines visible in a fresh scratch editor
const DEFAULT_VISIBLE_LINES: usize = 40;

/// An editor pane with selections and a viewport but no text
#[derive(Debug, Clone, PartialEq)]
pub struct ScratchEditor {
    id: EditorId,
    selections: Vec<Selection>,
    visible: Vec<Range>,
    cursor_style: Option<CursorStyle>,
    reveals: Vec<(Range, RevealType)>,
}

impl ScratchEditor {
    /// Cursor at the origin, first `DEFAULT_VISIBLE_LINES` lines visible
    pub fn new(id: EditorId) -> Self {
        Self {
            id,
            selections: vec![Selection::collapsed(Position::zero())],
            visible: vec![Range::lines(0, DEFAULT_VISIBLE_LINES)],
            cursor_style: None,
            reveals: Vec::new(),
        }
    }

    /// Builder: set the visible line span
    pub fn with_visible_lines(mut self, start: usize, end: usize) -> Self {
        self.visible = vec![Range::lines(start, end)];
        self
    }

    /// Builder: set every visible range, possibly none
    pub fn with_visible_ranges(mut self, ranges: Vec<Range>) -> Self {
        self.visible = ranges;
        self
    }

    /// Builder: set the selections
    pub fn with_selections(mut self, selections: Vec<Selection>) -> Self {
        self.selections = selections;
        self
    }

    pub fn cursor_style(&self) -> Option<CursorStyle> {
        self.cursor_style
    }

    /// Every range passed to `reveal_range`, oldest first
    pub fn reveals(&self) -> &[(Range, RevealType)] {
        &self.reveals
    }

    /// Scroll the first visible range just enough to contain `range`
    fn scroll_to(&mut self, range: Range) {
        let Some(visible) = self.visible.first_mut() else {
            self.visible = vec![range];
            return;
        };

        let height = visible.end.line.saturating_sub(visible.start.line);
        if range.start.line < visible.start.line {
            *visible = Range::lines(range.start.line, range.start.line + height);
        } else if range.end.line > visible.end.line {
            let top = range.end.line.saturating_sub(height);
            *visible = Range::lines(top, top + height);
        }
    }
}

impl TextEditor for ScratchEditor {
    fn id(&self) -> EditorId {
        self.id
    }

    fn selections(&self) -> &[Selection] {
        &self.selections
    }

    fn set_selections(&mut self, selections: Vec<Selection>) {
        self.selections = selections;
    }

    fn visible_ranges(&self) -> &[Range] {
        &self.visible
    }

    fn reveal_range(&mut self, range: Range, reveal: RevealType) {
        self.reveals.push((range, reveal));
        self.scroll_to(range);
    }

    fn set_cursor_style(&mut self, style: CursorStyle) {
        self.cursor_style = Some(style);
    }
}

/// Host that records effects in memory
#[derive(Debug, Clone, Default)]
pub struct ScratchHost {
    settings: Settings,
    editors: Vec<ScratchEditor>,
    active: Option<EditorId>,
    executed: Vec<String>,
    contexts: BTreeMap<String, bool>,
    typed: String,
    failing: HashSet<String>,
    interceptor: Option<TypeSubscription>,
    interceptors_installed: u64,
}

impl ScratchHost {
    /// A host with no editors
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Builder: add an editor, making it active if none is
    pub fn with_editor(mut self, editor: ScratchEditor) -> Self {
        self.add_editor(editor);
        self
    }

    pub fn add_editor(&mut self, editor: ScratchEditor) {
        if self.active.is_none() {
            self.active = Some(editor.id());
        }
        self.editors.push(editor);
    }

    /// Focus another editor, or none
    pub fn set_active(&mut self, id: Option<EditorId>) {
        self.active = id.filter(|id| self.editors.iter().any(|e| e.id() == *id));
    }

    pub fn editor(&self, id: EditorId) -> Option<&ScratchEditor> {
        self.editors.iter().find(|e| e.id() == id)
    }

    /// Swap the settings; the session only sees them after `ConfigurationChanged`
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Make every later call of `command` fail
    pub fn fail_command(&mut self, command: impl Into<String>) {
        self.failing.insert(command.into());
    }

    /// Commands run so far, oldest first
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    /// Drain the command log
    pub fn take_executed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.executed)
    }

    pub fn context(&self, key: &str) -> Option<bool> {
        self.contexts.get(key).copied()
    }

    /// Text inserted by pass-through type events
    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn is_intercepting(&self) -> bool {
        self.interceptor.is_some()
    }

    /// How many times a type interceptor has been registered
    pub fn interceptors_installed(&self) -> u64 {
        self.interceptors_installed
    }
}

impl Host for ScratchHost {
    type Editor = ScratchEditor;

    fn execute_command(&mut self, command: &str) -> Result<()> {
        if self.failing.contains(command) {
            return Err(Error::command_failed(command, "rejected by scratch host"));
        }
        self.executed.push(command.to_string());

        if command == CANCEL_SELECTION {
            if let Some(editor) = self.active_editor_mut() {
                for selection in &mut editor.selections {
                    selection.collapse();
                }
            }
        }
        Ok(())
    }

    fn set_context(&mut self, key: &str, value: bool) -> Result<()> {
        self.contexts.insert(key.to_string(), value);
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        self.typed.push_str(text);
        Ok(())
    }

    fn configuration(&self, section: &str) -> Map<String, Value> {
        self.settings.section(section)
    }

    fn active_editor(&self) -> Option<&ScratchEditor> {
        let id = self.active?;
        self.editors.iter().find(|e| e.id() == id)
    }

    fn active_editor_mut(&mut self) -> Option<&mut ScratchEditor> {
        let id = self.active?;
        self.editors.iter_mut().find(|e| e.id() == id)
    }

    fn editor_mut(&mut self, id: EditorId) -> Option<&mut ScratchEditor> {
        self.editors.iter_mut().find(|e| e.id() == id)
    }

    fn register_type_interceptor(&mut self) -> TypeSubscription {
        self.interceptors_installed += 1;
        let subscription = TypeSubscription(self.interceptors_installed);
        self.interceptor = Some(subscription);
        subscription
    }

    fn dispose_type_interceptor(&mut self, subscription: TypeSubscription) {
        if self.interceptor == Some(subscription) {
            self.interceptor = None;
        }
    }
}
