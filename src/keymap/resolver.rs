//! Per-key resolution against the current keymap node

use std::sync::Arc;

use super::action::{Action, Keymap};

/// Result of handling a keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Run these commands in order
    Execute(Vec<String>),
    /// Keystroke entered a sub-keymap, await more input
    AwaitMore,
    /// No binding matches this keystroke
    NoMatch,
}

/// Holds the root keymap and the node the next key is matched against
#[derive(Debug, Clone)]
pub struct Resolver {
    root: Arc<Keymap>,
    /// Current node; the root unless a sequence is in progress
    pointer: Arc<Keymap>,
    /// Keys pressed along the pending sequence (for status display)
    pending: Vec<String>,
}

impl Resolver {
    pub fn new(root: Keymap) -> Self {
        let root = Arc::new(root);
        Self {
            pointer: Arc::clone(&root),
            root,
            pending: Vec::new(),
        }
    }

    /// Replace the root keymap, abandoning any pending sequence
    pub fn configure(&mut self, root: Keymap) {
        *self = Self::new(root);
    }

    pub fn root(&self) -> &Keymap {
        &self.root
    }

    /// Return the pointer to the root
    pub fn reset(&mut self) {
        self.pointer = Arc::clone(&self.root);
        self.pending.clear();
    }

    /// Check if a multi-key sequence is in progress
    pub fn is_pending(&self) -> bool {
        !Arc::ptr_eq(&self.pointer, &self.root)
    }

    pub fn pending_keys(&self) -> &[String] {
        &self.pending
    }

    /// Get the pending keys for status bar display
    pub fn pending_display(&self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.join(" "))
        }
    }

    /// Handle a keystroke and return the commands to run
    ///
    /// `is_selecting` is consulted only when a branch is reached.
    pub fn handle_key(&mut self, key: &str, is_selecting: &dyn Fn() -> bool) -> KeyAction {
        let node = Arc::clone(&self.pointer);
        let mut path = std::mem::take(&mut self.pending);

        let action = node.get(key);
        let result = self.evaluate(action, is_selecting);

        if result == KeyAction::AwaitMore {
            path.push(key.to_string());
            self.pending = path;
        }

        tracing::trace!(
            key,
            kind = action.map(Action::kind),
            ?result,
            pending = ?self.pending,
            "Resolved key"
        );
        result
    }

    /// Interpret an action
    ///
    /// Always resets the pointer to the root before looking at `action`. Only
    /// a keymap leaves the pointer elsewhere, since it is assigned after the
    /// reset. Branches recurse, so nested branches reset and re-branch too.
    pub fn evaluate(&mut self, action: Option<&Action>, is_selecting: &dyn Fn() -> bool) -> KeyAction {
        self.reset();

        match action {
            None => KeyAction::NoMatch,
            Some(Action::Command(id)) => KeyAction::Execute(vec![id.clone()]),
            Some(Action::Sequence(ids)) => KeyAction::Execute(ids.clone()),
            Some(Action::Branch(branch)) => {
                let next = match &branch.selecting {
                    Some(selecting) if is_selecting() => selecting,
                    _ => &branch.default,
                };
                self.evaluate(Some(next), is_selecting)
            }
            Some(Action::Keymap(keymap)) => {
                self.pointer = Arc::clone(keymap);
                KeyAction::AwaitMore
            }
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Keymap::new())
    }
}
