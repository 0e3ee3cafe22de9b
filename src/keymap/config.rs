//! Keymap validation from raw configuration values
//!
//! User settings arrive as untyped JSON. A single pass here decides what each
//! value is and builds the typed [`Action`] tree; entries that fit no variant
//! are dropped without an error.
//!
//! An object is a branch when its `default` entry is set and is itself an
//! action, and its `selecting` entry (if set) is an action too. Any other
//! object whose values are all actions is a keymap. `null`, `false`, `0` and
//! `""` count as unset for `default` and `selecting`.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::action::{Action, Branch, Keymap};

impl Action {
    /// Build an action from a raw configuration value
    ///
    /// Returns `None` for anything that is not a string, a list of strings,
    /// a branch, or a keymap. There is no depth limit.
    pub fn from_value(value: &Value) -> Option<Action> {
        match value {
            Value::String(id) => Some(Action::Command(id.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Action::Sequence),
            Value::Object(entries) => parse_branch(entries)
                .map(|branch| Action::Branch(Box::new(branch)))
                .or_else(|| parse_keymap(entries).map(|keymap| Action::Keymap(Arc::new(keymap)))),
            _ => None,
        }
    }
}

/// Whether a raw value is a valid action of any kind
pub fn is_action(value: &Value) -> bool {
    Action::from_value(value).is_some()
}

/// Whether a raw value is a valid branch
pub fn is_branch(value: &Value) -> bool {
    value.as_object().and_then(parse_branch).is_some()
}

/// Whether a raw value is a valid keymap (and not a branch)
pub fn is_keymap(value: &Value) -> bool {
    match value.as_object() {
        Some(entries) => parse_branch(entries).is_none() && parse_keymap(entries).is_some(),
        None => false,
    }
}

/// Build the root keymap from a configuration section
///
/// Invalid entries are dropped one by one; valid entries are kept.
pub fn build_root_keymap(entries: &Map<String, Value>) -> Keymap {
    entries
        .iter()
        .filter_map(|(key, value)| match Action::from_value(value) {
            Some(action) => Some((key.clone(), action)),
            None => {
                tracing::debug!(key = %key, "Dropping invalid keybinding");
                None
            }
        })
        .collect()
}

/// Keys of a configuration section that `build_root_keymap` would drop
pub fn invalid_entries(entries: &Map<String, Value>) -> Vec<String> {
    entries
        .iter()
        .filter(|(_, value)| !is_action(value))
        .map(|(key, _)| key.clone())
        .collect()
}

fn parse_branch(entries: &Map<String, Value>) -> Option<Branch> {
    let default = entries.get("default").filter(|v| is_set(v))?;
    let default = Action::from_value(default)?;

    let selecting = match entries.get("selecting").filter(|v| is_set(v)) {
        Some(value) => Some(Action::from_value(value)?),
        None => None,
    };

    Some(Branch { default, selecting })
}

fn parse_keymap(entries: &Map<String, Value>) -> Option<Keymap> {
    entries
        .iter()
        .map(|(key, value)| Action::from_value(value).map(|action| (key.clone(), action)))
        .collect()
}

/// Null, false, zero and the empty string count as unset
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
