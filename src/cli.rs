//! Command-line interface
//!
//! Supports:
//! - Validating a keymap (`bext check`)
//! - Replaying key events against an in-memory editor (`bext replay`)
//! - Showing where settings and logs live (`bext paths`)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::Settings;
use crate::config_paths;
use crate::editor::EditorId;
use crate::host::{ScratchEditor, ScratchHost};
use crate::keymap::{build_root_keymap, invalid_entries, Keymap};
use crate::mode::Mode;
use crate::session::Session;

/// Modal keybinding engine
#[derive(Parser, Debug)]
#[command(name = "bext", version, about = "Modal keybinding engine")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Validate keybindings and print the accepted keymap as YAML
    Check(SettingsArgs),

    /// Type events into a scratch editor and print what ran
    Replay {
        #[command(flatten)]
        settings: SettingsArgs,

        /// `:command.id` runs a command; anything else is typed one character at a time
        #[arg(value_name = "EVENTS")]
        events: Vec<String>,
    },

    /// Print the config, settings and logs paths
    Paths,
}

/// Where settings come from
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Settings file to use instead of the one in the config directory
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Leave out the built-in default keybindings
    #[arg(long)]
    pub no_defaults: bool,
}

impl SettingsArgs {
    /// Resolve the settings these flags describe
    ///
    /// A settings file that exists must load, except the implicit user file
    /// layered over the defaults, which falls back to the defaults alone.
    pub fn load(&self) -> anyhow::Result<Settings> {
        use anyhow::Context;

        let base = if self.no_defaults {
            Settings::new()
        } else {
            Settings::defaults()
        };

        match &self.settings {
            Some(path) => {
                let user = Settings::load_file(path)
                    .with_context(|| format!("loading settings from {}", path.display()))?;
                Ok(base.layered(user))
            }
            None if self.no_defaults => {
                let user = config_paths::settings_file()
                    .filter(|path| path.exists())
                    .map(|path| Settings::load_file(&path))
                    .transpose()
                    .context("loading user settings")?;
                Ok(user.unwrap_or_default())
            }
            None => Ok(Settings::load()),
        }
    }
}

/// Outcome of `bext check`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    /// Bindings that passed validation
    #[serde(rename = "bext.keybindings")]
    pub keymap: Keymap,
    /// Top-level keys that were dropped
    #[serde(skip)]
    pub dropped: Vec<String>,
}

/// Validate the keybindings section of `settings`
pub fn check(settings: &Settings) -> CheckReport {
    let entries = settings.keybindings();
    CheckReport {
        keymap: build_root_keymap(&entries),
        dropped: invalid_entries(&entries),
    }
}

/// Outcome of `bext replay`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Host commands in the order they ran
    pub executed: Vec<String>,
    /// Text that reached the editor as typing
    pub typed: String,
    pub mode: Mode,
    /// Keys of an unfinished sequence
    pub pending: Vec<String>,
    pub selecting: bool,
    /// Events that failed, with the reason
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Activate a session over a scratch editor and feed it `events`
///
/// Failed events are recorded in the report and do not stop the replay.
pub fn replay(settings: Settings, events: &[String]) -> ReplayReport {
    let host = ScratchHost::new(settings).with_editor(ScratchEditor::new(EditorId(1)));
    let mut session = Session::new(host);
    let mut errors = Vec::new();

    if let Err(e) = session.activate() {
        errors.push(format!("activate: {e}"));
    }
    // Activation noise is not part of the replay
    session.host_mut().take_executed();

    for event in events {
        if let Some(command) = event.strip_prefix(':') {
            if let Err(e) = session.run(command) {
                tracing::warn!(event = %event, error = %e, "Replay event failed");
                errors.push(format!("{event}: {e}"));
            }
            continue;
        }

        for ch in event.chars() {
            let key = ch.to_string();
            if let Err(e) = session.on_type(&key) {
                tracing::warn!(key = %key, error = %e, "Replay key failed");
                errors.push(format!("{key}: {e}"));
            }
        }
    }

    ReplayReport {
        executed: session.host().executed().to_vec(),
        typed: session.host().typed().to_string(),
        mode: session.mode(),
        pending: session.pending_keys().to_vec(),
        selecting: session.is_selecting(),
        errors,
    }
}
