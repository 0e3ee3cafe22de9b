//! Errors raised while driving the host editor

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by commands and key handling
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The host rejected or failed a command
    #[error("command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// The operation needs an active text editor
    #[error("no active text editor")]
    NoActiveEditor,

    /// The active editor reported no visible range
    #[error("active editor has no visible range")]
    NoVisibleRange,

    /// A command id that names none of the engine's own commands
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
}

impl Error {
    pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }
}
