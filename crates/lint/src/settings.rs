//! Lint settings, optionally loaded from `litlint.json`.

use std::path::Path;

use serde::Deserialize;

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "litlint.json";

/// Knobs shared by all rules
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base class whose subclasses are checked
    pub base_class: String,
    /// Name of the static member holding property metadata
    pub properties_member: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_class: "LitElement".to_string(),
            properties_member: "properties".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `litlint.json` under `directory`.
    ///
    /// A missing file is normal and yields defaults. An unreadable or
    /// malformed file logs a warning and yields defaults.
    pub fn load(directory: &Path) -> Self {
        let path = directory.join(SETTINGS_FILE);
        if !path.exists() {
            return Self::default();
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!("Failed to read {}: {}", path.display(), err);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&contents) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}
