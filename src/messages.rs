//! Events delivered to a session
//!
//! Every host notification the engine reacts to has a variant here, so a
//! session can be driven from a queue as well as by direct calls.

use crate::commands::CommandId;
use crate::editor::EditorId;

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Read configuration and enter normal mode
    Activate,
    /// Hand type events back to the host
    Deactivate,
    /// A type event with the text the user typed
    Type(String),
    /// Run one of the engine's commands
    Command(CommandId),
    /// The keybinding settings changed
    ConfigurationChanged,
    /// Focus moved to another editor, or to none
    ActiveEditorChanged(Option<EditorId>),
    /// The set of visible editors changed
    VisibleEditorsChanged(Vec<EditorId>),
}

impl Msg {
    /// Shorthand for a type event
    pub fn typed(text: impl Into<String>) -> Self {
        Msg::Type(text.into())
    }
}
