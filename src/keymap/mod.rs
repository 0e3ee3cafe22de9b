//! Configurable modal keymap
//!
//! This module provides the data-driven keybinding system that:
//! - Validates user configuration into a typed binding tree
//! - Supports multi-key sequences through nested keymaps
//! - Picks between bindings by selection state (branches)
//!
//! # Architecture
//!
//! ```text
//! settings section → build_root_keymap() → Resolver::handle_key() → KeyAction
//! ```
//!
//! # Binding shapes
//!
//! ```yaml
//! j: cursorDown                                   # command
//! a: [cursorRight, bext.enterInsert]              # sequence
//! h: { default: cursorLeft, selecting: cursorLeftSelect }   # branch
//! g: { g: cursorTop }                             # nested keymap
//! ```

mod action;
mod config;
mod resolver;

pub use action::{Action, Branch, Keymap};
pub use config::{build_root_keymap, invalid_entries, is_action, is_branch, is_keymap};
pub use resolver::{KeyAction, Resolver};
