//! Settings loading
//!
//! Settings are read from YAML (or JSON, by `.json` extension) into a
//! `serde_json::Value` tree so that raw keybinding entries reach the keymap
//! validator untouched. Layers stack: the embedded defaults first, then the
//! user's `~/.config/bext/settings.yaml`. A later layer overrides a section
//! one entry at a time.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Section holding the user keymap
pub const KEYBINDINGS_SECTION: &str = "bext.keybindings";

/// Default settings embedded at compile time
const DEFAULT_SETTINGS_YAML: &str = include_str!("../keymap.yaml");

/// Errors that can occur when loading settings files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(String),

    #[error("settings root must be a mapping")]
    NotAMapping,
}

/// Layered settings, earliest layer first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    layers: Vec<Map<String, Value>>,
}

impl Settings {
    /// Settings with no layers; every section is empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-layer settings from an already-parsed mapping
    pub fn from_map(root: Map<String, Value>) -> Self {
        Self { layers: vec![root] }
    }

    /// Parse one layer from YAML text
    pub fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_root(yaml_to_json(value))
    }

    /// Parse one layer from JSON text
    pub fn parse_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_root(value)
    }

    /// Load one layer from a file, JSON if the extension says so, YAML otherwise
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_yaml(&content)
        }
    }

    /// The embedded default settings
    pub fn defaults() -> Self {
        match Self::parse_yaml(DEFAULT_SETTINGS_YAML) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to parse embedded settings: {}", e);
                Self::new()
            }
        }
    }

    /// Embedded defaults overlaid with the user settings file, if any
    ///
    /// A missing or unreadable user file falls back to the defaults alone.
    pub fn load() -> Self {
        let defaults = Self::defaults();

        let Some(path) = crate::config_paths::settings_file() else {
            tracing::debug!("No config directory available, using defaults");
            return defaults;
        };

        if !path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                path.display()
            );
            return defaults;
        }

        match Self::load_file(&path) {
            Ok(user) => {
                tracing::info!("Loaded settings from {}", path.display());
                defaults.layered(user)
            }
            Err(e) => {
                tracing::warn!("Failed to load settings at {}: {}", path.display(), e);
                defaults
            }
        }
    }

    /// Stack `other`'s layers on top of these
    pub fn layered(mut self, other: Settings) -> Self {
        self.layers.extend(other.layers);
        self
    }

    /// Raw entries of a section, later layers overriding earlier ones per key
    ///
    /// A section is found either under its full dotted name
    /// (`"bext.keybindings": {..}`) or as a nested path
    /// (`bext: { keybindings: {..} }`).
    pub fn section(&self, name: &str) -> Map<String, Value> {
        let mut merged = Map::new();
        for layer in &self.layers {
            if let Some(entries) = section_in(layer, name) {
                for (key, value) in entries {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        merged
    }

    /// The keymap section
    pub fn keybindings(&self) -> Map<String, Value> {
        self.section(KEYBINDINGS_SECTION)
    }

    fn from_root(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(root) => Ok(Self::from_map(root)),
            // An empty file
            Value::Null => Ok(Self::from_map(Map::new())),
            _ => Err(ConfigError::NotAMapping),
        }
    }
}

fn section_in<'a>(root: &'a Map<String, Value>, name: &str) -> Option<&'a Map<String, Value>> {
    if let Some(Value::Object(entries)) = root.get(name) {
        return Some(entries);
    }

    let mut current = root;
    for part in name.split('.') {
        match current.get(part) {
            Some(Value::Object(next)) => current = next,
            _ => return None,
        }
    }
    Some(current)
}

/// Convert a YAML tree to JSON, stringifying scalar mapping keys
///
/// Bindings such as `0: cursorHome` have integer keys in YAML.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Number(n) => n.to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
