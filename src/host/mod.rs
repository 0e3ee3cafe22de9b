//! Host editor collaborator
//!
//! Everything the engine needs from the editor it is embedded in: running
//! commands by name, publishing context keys, default text insertion,
//! configuration access, and the editors themselves.
//!
//! ```text
//! type event → Session → Host::execute_command / TextEditor geometry
//! ```

mod scratch;

use serde_json::{Map, Value};

use crate::editor::{EditorId, TextEditor};
use crate::error::Result;

pub use scratch::{ScratchEditor, ScratchHost};

/// Handle to an installed type interceptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSubscription(pub u64);

/// The editor the engine is embedded in
pub trait Host {
    type Editor: TextEditor;

    /// Run a named editor command to completion
    fn execute_command(&mut self, command: &str) -> Result<()>;

    /// Publish a boolean context key (status bar, `when` clauses)
    fn set_context(&mut self, key: &str, value: bool) -> Result<()>;

    /// The host's own handling of a type event (text insertion)
    fn type_text(&mut self, text: &str) -> Result<()>;

    /// Raw entries of a configuration section
    fn configuration(&self, section: &str) -> Map<String, Value>;

    fn active_editor(&self) -> Option<&Self::Editor>;

    fn active_editor_mut(&mut self) -> Option<&mut Self::Editor>;

    fn editor_mut(&mut self, id: EditorId) -> Option<&mut Self::Editor>;

    /// Route type events to the engine instead of `type_text`
    fn register_type_interceptor(&mut self) -> TypeSubscription;

    /// Give type events back to the host
    fn dispose_type_interceptor(&mut self, subscription: TypeSubscription);
}
