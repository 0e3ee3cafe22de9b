//! Engine state and event handlers
//!
//! A [`Session`] owns everything the engine remembers between events: the
//! resolver (root keymap and pointer), the zero-width selecting flag, and
//! the mode. Every handler takes `&mut self`, so one event is fully handled
//! before the next one starts.

use crate::commands::{self, CommandId, PAGE_LINES};
use crate::config::KEYBINDINGS_SECTION;
use crate::editor::EditorId;
use crate::error::Result;
use crate::host::Host;
use crate::keymap::{build_root_keymap, KeyAction, Resolver};
use crate::messages::Msg;
use crate::mode::{Mode, ModeController};
use crate::selection::SelectionTracker;

/// The modal engine bound to one host
#[derive(Debug)]
pub struct Session<H: Host> {
    host: H,
    resolver: Resolver,
    selection: SelectionTracker,
    modes: ModeController,
}

impl<H: Host> Session<H> {
    /// A dormant session; call [`Session::activate`] to start intercepting keys
    pub fn new(host: H) -> Self {
        Self {
            host,
            resolver: Resolver::default(),
            selection: SelectionTracker::new(),
            modes: ModeController::new(),
        }
    }

    /// Load the keymap and enter normal mode
    pub fn activate(&mut self) -> Result<()> {
        self.configuration_changed();
        self.execute(CommandId::EnterNormal)
    }

    /// Enter insert mode, giving type events back to the host
    pub fn deactivate(&mut self) -> Result<()> {
        self.execute(CommandId::EnterInsert)
    }

    /// Rebuild the root keymap from the host's settings
    ///
    /// Any pending multi-key sequence is abandoned.
    pub fn configuration_changed(&mut self) {
        let entries = self.host.configuration(KEYBINDINGS_SECTION);
        let root = build_root_keymap(&entries);
        tracing::debug!(
            bindings = root.len(),
            dropped = entries.len() - root.len(),
            "Rebuilt root keymap"
        );
        self.resolver.configure(root);
    }

    /// Handle a type event from the host
    pub fn on_type(&mut self, text: &str) -> Result<()> {
        if self.modes.is_intercepting() {
            self.on_key(text)
        } else {
            self.host.type_text(text)
        }
    }

    /// Resolve one key against the keymap and run what it is bound to
    ///
    /// Commands run in order; the first failure stops the rest.
    pub fn on_key(&mut self, key: &str) -> Result<()> {
        self.selection.adjust(self.host.active_editor());

        let host = &self.host;
        let selection = &self.selection;
        let action = self
            .resolver
            .handle_key(key, &|| selection.is_selecting(host.active_editor()));

        match action {
            KeyAction::Execute(ids) => {
                for id in &ids {
                    self.run(id)?;
                }
            }
            KeyAction::AwaitMore | KeyAction::NoMatch => {}
        }
        Ok(())
    }

    /// Run a command by id, engine commands first
    pub fn run(&mut self, id: &str) -> Result<()> {
        match id.parse::<CommandId>() {
            Ok(command) => self.execute(command),
            Err(_) => {
                tracing::debug!(command = id, "Executing host command");
                self.host.execute_command(id)
            }
        }
    }

    /// Run one of the engine's own commands
    pub fn execute(&mut self, command: CommandId) -> Result<()> {
        tracing::debug!(%command, "Executing");
        match command {
            CommandId::EnterNormal => self.modes.enter_normal(&mut self.host, &mut self.selection),
            CommandId::EnterInsert => self.modes.enter_insert(&mut self.host, &mut self.selection),
            CommandId::ToggleSelection => self.selection.toggle(&mut self.host),
            CommandId::CancelSelection => self.selection.cancel(&mut self.host),
            CommandId::MoveDown => commands::move_by(&mut self.host, &self.selection, PAGE_LINES),
            CommandId::MoveUp => commands::move_by(&mut self.host, &self.selection, -PAGE_LINES),
            CommandId::SwapActiveAndAnchor => commands::swap_active_and_anchor(&mut self.host),
            CommandId::CopyWord => commands::copy_word(&mut self.host),
        }
    }

    /// Restyle the newly focused editor for the current mode
    pub fn active_editor_changed(&mut self, editor: Option<EditorId>) {
        if let Some(id) = editor {
            self.modes.update_cursor(self.host.editor_mut(id));
        }
    }

    /// Restyle every visible editor for the current mode
    pub fn visible_editors_changed(&mut self, editors: &[EditorId]) {
        for &id in editors {
            self.modes.update_cursor(self.host.editor_mut(id));
        }
    }

    /// Dispatch a queued event to its handler
    pub fn update(&mut self, msg: Msg) -> Result<()> {
        match msg {
            Msg::Activate => self.activate(),
            Msg::Deactivate => self.deactivate(),
            Msg::Type(text) => self.on_type(&text),
            Msg::Command(command) => self.execute(command),
            Msg::ConfigurationChanged => {
                self.configuration_changed();
                Ok(())
            }
            Msg::ActiveEditorChanged(editor) => {
                self.active_editor_changed(editor);
                Ok(())
            }
            Msg::VisibleEditorsChanged(editors) => {
                self.visible_editors_changed(&editors);
                Ok(())
            }
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn is_intercepting(&self) -> bool {
        self.modes.is_intercepting()
    }

    /// Whether branch bindings currently take their `selecting` arm
    pub fn is_selecting(&self) -> bool {
        self.selection.is_selecting(self.host.active_editor())
    }

    pub fn zero_width_selecting(&self) -> bool {
        self.selection.zero_width_selecting()
    }

    /// Keys typed so far in an unfinished multi-key sequence
    pub fn pending_keys(&self) -> &[String] {
        self.resolver.pending_keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::editor::{CursorStyle, Position, Selection, TextEditor};
    use crate::error::Error;
    use crate::host::{ScratchEditor, ScratchHost};
    use crate::selection::CANCEL_SELECTION;

    const BINDINGS: &str = r#"
bext.keybindings:
  i: bext.enterInsert
  j: cursorDown
  s: [cmdA, cmdB, cmdC]
  d: { default: deleteRight, selecting: [cut, bext.cancelSelection] }
  v: bext.toggleSelection
  g: { g: cursorTop }
"#;

    fn session() -> Session<ScratchHost> {
        let settings = Settings::parse_yaml(BINDINGS).unwrap();
        let host = ScratchHost::new(settings).with_editor(ScratchEditor::new(EditorId(1)));
        let mut session = Session::new(host);
        session.activate().unwrap();
        session.host_mut().take_executed();
        session
    }

    #[test]
    fn test_activate_enters_normal_mode() {
        let session = session();
        assert_eq!(session.mode(), Mode::Normal);
        assert!(session.is_intercepting());
        assert_eq!(session.resolver().root().len(), 6);
    }

    #[test]
    fn test_type_resolves_in_normal_mode() {
        let mut session = session();
        session.on_type("j").unwrap();
        assert_eq!(session.host().executed(), ["cursorDown".to_string()]);
        assert_eq!(session.host().typed(), "");
    }

    #[test]
    fn test_type_passes_through_in_insert_mode() {
        let mut session = session();
        session.on_type("i").unwrap();
        assert_eq!(session.mode(), Mode::Insert);

        session.host_mut().take_executed();
        session.on_type("j").unwrap();
        assert!(session.host().executed().is_empty());
        assert_eq!(session.host().typed(), "j");
    }

    #[test]
    fn test_failure_aborts_sequence() {
        let mut session = session();
        session.host_mut().fail_command("cmdB");

        let result = session.on_type("s");
        assert!(matches!(result, Err(Error::CommandFailed { .. })));
        assert_eq!(session.host().executed(), ["cmdA".to_string()]);
    }

    #[test]
    fn test_toggle_then_branch_takes_selecting_arm() {
        let mut session = session();
        session.on_type("v").unwrap();
        assert!(session.is_selecting());

        session.on_type("d").unwrap();
        assert_eq!(
            session.host().executed(),
            [
                CANCEL_SELECTION.to_string(),
                "cut".to_string(),
                CANCEL_SELECTION.to_string(),
            ]
        );
        assert!(!session.is_selecting());
    }

    #[test]
    fn test_deactivate_restores_host_typing() {
        let mut session = session();
        session.deactivate().unwrap();
        assert!(!session.host().is_intercepting());
        assert_eq!(
            session.host().active_editor().and_then(|e| e.cursor_style()),
            Some(CursorStyle::Underline)
        );
    }

    #[test]
    fn test_editor_change_restyles_cursor() {
        let mut session = session();
        session.host_mut().add_editor(ScratchEditor::new(EditorId(2)));
        session.update(Msg::ActiveEditorChanged(Some(EditorId(2)))).unwrap();

        let editor = session.host().editor(EditorId(2)).unwrap();
        assert_eq!(editor.cursor_style(), Some(CursorStyle::Block));
    }

    #[test]
    fn test_configuration_change_resets_pending() {
        let mut session = session();
        session.on_type("g").unwrap();
        assert_eq!(session.pending_keys(), ["g".to_string()]);

        session.update(Msg::ConfigurationChanged).unwrap();
        assert!(session.pending_keys().is_empty());
    }

    #[test]
    fn test_real_selection_selects_branch() {
        let mut session = session();
        let selection = Selection::new(Position::new(0, 0), Position::new(0, 3));
        if let Some(editor) = session.host_mut().active_editor_mut() {
            editor.set_selections(vec![selection]);
        }
        session.on_type("d").unwrap();
        assert_eq!(session.host().executed()[0], "cut");
    }
}
