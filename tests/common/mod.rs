//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use bext::config::Settings;
use bext::editor::{EditorId, Position, Selection};
use bext::host::{ScratchEditor, ScratchHost};
use bext::Session;

/// Id of the editor every helper creates
pub const EDITOR: EditorId = EditorId(1);

/// Settings from a YAML snippet
pub fn settings(yaml: &str) -> Settings {
    Settings::parse_yaml(yaml).expect("test settings should parse")
}

/// A host with one editor, cursor at `(line, column)`, lines `visible` in view
pub fn test_host(yaml: &str, line: usize, column: usize, visible: (usize, usize)) -> ScratchHost {
    let editor = ScratchEditor::new(EDITOR)
        .with_visible_lines(visible.0, visible.1)
        .with_selections(vec![Selection::collapsed(Position::new(line, column))]);
    ScratchHost::new(settings(yaml)).with_editor(editor)
}

/// An activated session over `test_host`, with the activation commands cleared
pub fn test_session(yaml: &str) -> Session<ScratchHost> {
    test_session_at(yaml, 0, 0, (0, 40))
}

pub fn test_session_at(
    yaml: &str,
    line: usize,
    column: usize,
    visible: (usize, usize),
) -> Session<ScratchHost> {
    let mut session = Session::new(test_host(yaml, line, column, visible));
    session.activate().expect("activation should succeed");
    session.host_mut().take_executed();
    session
}

/// Type every character of `keys` as its own event
pub fn type_keys(session: &mut Session<ScratchHost>, keys: &str) {
    for ch in keys.chars() {
        session
            .on_type(&ch.to_string())
            .unwrap_or_else(|e| panic!("typing {ch:?} failed: {e}"));
    }
}

/// Replace the active editor's selections
pub fn select(session: &mut Session<ScratchHost>, selections: Vec<Selection>) {
    use bext::editor::TextEditor;
    use bext::host::Host;

    if let Some(editor) = session.host_mut().active_editor_mut() {
        editor.set_selections(selections);
    }
}

/// Owned strings for comparing against command logs
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
