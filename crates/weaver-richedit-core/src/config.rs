//! Editor configuration.

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, miette};
use serde::{Deserialize, Serialize};

/// Line height the engine ships with, in pixels.
pub const DEFAULT_LINE_HEIGHT_PX: u32 = 21;

/// Navigation prefix the engine uses to signal a non-empty event queue.
pub const DEFAULT_CALLBACK_SCHEME: &str = "re-callback://";

/// Message-channel name carrying layout size samples.
pub const DEFAULT_VIEWPORT_MESSAGE: &str = "editorSize";

/// Keyboard appearance requested for the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardAppearance {
    #[default]
    Default,
    Light,
    Dark,
}

/// Per-instance input assistance settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub keyboard_appearance: KeyboardAppearance,
    /// Hide the engine's input accessory bar above the keyboard.
    pub hide_input_accessory: bool,
}

/// Configuration for one editor instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Directory holding the engine bootstrap resources.
    pub resource_dir: PathBuf,
    /// Bootstrap document, relative to `resource_dir`.
    pub bootstrap_file: String,
    pub callback_scheme: String,
    pub viewport_message: String,
    pub default_line_height_px: u32,
    pub input: InputConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("assets"),
            bootstrap_file: "rich_editor.html".to_owned(),
            callback_scheme: DEFAULT_CALLBACK_SCHEME.to_owned(),
            viewport_message: DEFAULT_VIEWPORT_MESSAGE.to_owned(),
            default_line_height_px: DEFAULT_LINE_HEIGHT_PX,
            input: InputConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Load a configuration file. Supports `.toml` and `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents).into_diagnostic(),
            Some("toml") => toml::from_str(&contents).into_diagnostic(),
            _ => Err(miette!("Unsupported config format: {}", path.display())),
        }
    }

    /// Full path of the bootstrap document.
    pub fn bootstrap_path(&self) -> PathBuf {
        self.resource_dir.join(&self.bootstrap_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EditorConfig = toml::from_str(
            r#"
            resource_dir = "/opt/editor"

            [input]
            keyboard_appearance = "dark"
            "#,
        )
        .unwrap();

        assert_eq!(config.resource_dir, PathBuf::from("/opt/editor"));
        assert_eq!(config.input.keyboard_appearance, KeyboardAppearance::Dark);
        assert!(!config.input.hide_input_accessory);
        assert_eq!(config.callback_scheme, DEFAULT_CALLBACK_SCHEME);
        assert_eq!(config.default_line_height_px, 21);
        assert_eq!(
            config.bootstrap_path(),
            PathBuf::from("/opt/editor/rich_editor.html")
        );
    }

    #[test]
    fn test_load_json_and_reject_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("editor.json");
        std::fs::write(&json, r#"{"viewport_message": "size", "input": {"hide_input_accessory": true}}"#)
            .unwrap();
        let config = EditorConfig::load(&json).unwrap();
        assert_eq!(config.viewport_message, "size");
        assert!(config.input.hide_input_accessory);

        let yaml = dir.path().join("editor.yaml");
        std::fs::write(&yaml, "a: 1").unwrap();
        assert!(EditorConfig::load(&yaml).is_err());
    }
}
