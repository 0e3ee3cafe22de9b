//! The binding grammar: what a key can be bound to

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

/// A key binding
///
/// Serializes back to the configuration shape it was read from: a string, a
/// list of strings, a `{ default, selecting }` object, or a key-to-action map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Action {
    /// Run one command
    Command(String),
    /// Run commands in order, each completing before the next starts
    Sequence(Vec<String>),
    /// Pick a sub-action by selection state
    Branch(Box<Branch>),
    /// Wait for another key
    Keymap(Arc<Keymap>),
}

impl Action {
    pub fn command(id: impl Into<String>) -> Self {
        Action::Command(id.into())
    }

    pub fn sequence<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Action::Sequence(ids.into_iter().map(Into::into).collect())
    }

    pub fn branch(default: Action, selecting: Option<Action>) -> Self {
        Action::Branch(Box::new(Branch { default, selecting }))
    }

    pub fn keymap<I, K>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, Action)>,
        K: Into<String>,
    {
        Action::Keymap(Arc::new(
            bindings.into_iter().map(|(k, a)| (k.into(), a)).collect(),
        ))
    }

    /// Short variant name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Command(_) => "command",
            Action::Sequence(_) => "sequence",
            Action::Branch(_) => "branch",
            Action::Keymap(_) => "keymap",
        }
    }
}

/// Selection-conditional binding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    /// Used when not selecting, or when `selecting` is absent
    pub default: Action,
    /// Used while selecting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selecting: Option<Action>,
}

/// One level of a (possibly multi-key) keymap
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Keymap {
    bindings: BTreeMap<String, Action>,
}

impl Keymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the binding for a key
    pub fn get(&self, key: &str) -> Option<&Action> {
        self.bindings.get(key)
    }

    /// Bind a key, returning the previous binding
    pub fn insert(&mut self, key: impl Into<String>, action: Action) -> Option<Action> {
        self.bindings.insert(key.into(), action)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.bindings.iter().map(|(k, a)| (k.as_str(), a))
    }
}

impl FromIterator<(String, Action)> for Keymap {
    fn from_iter<T: IntoIterator<Item = (String, Action)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_to_config_shape() {
        let action = Action::keymap([
            ("g", Action::command("cursorTop")),
            ("s", Action::sequence(["a", "b"])),
            (
                "d",
                Action::branch(Action::command("deleteRight"), Some(Action::command("cut"))),
            ),
            ("h", Action::branch(Action::command("cursorLeft"), None)),
        ]);

        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "g": "cursorTop",
                "s": ["a", "b"],
                "d": { "default": "deleteRight", "selecting": "cut" },
                "h": { "default": "cursorLeft" }
            })
        );
    }

    #[test]
    fn test_insert_replaces() {
        let mut keymap = Keymap::new();
        assert!(keymap.insert("j", Action::command("cursorDown")).is_none());
        let previous = keymap.insert("j", Action::command("scrollLineDown"));
        assert_eq!(previous, Some(Action::command("cursorDown")));
        assert_eq!(keymap.len(), 1);
    }
}
