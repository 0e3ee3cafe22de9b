//! bext - a modal keybinding engine
//!
//! Type events are either handed to the editor (insert mode) or resolved
//! against a configurable, multi-key keymap whose bindings can depend on
//! whether text is selected (normal mode). The editor itself is reached
//! through the [`host::Host`] and [`editor::TextEditor`] traits.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod error;
pub mod host;
pub mod keymap;
pub mod messages;
pub mod mode;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod tracing;

pub use commands::CommandId;
pub use error::{Error, Result};
pub use messages::Msg;
pub use mode::Mode;
pub use session::Session;
