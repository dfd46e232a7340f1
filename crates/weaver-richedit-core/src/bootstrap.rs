//! Locating the engine bootstrap document.

use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::error::BridgeError;

/// The bootstrap document and the base URL its relative resources resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    pub html: String,
    pub base_url: String,
    pub path: PathBuf,
}

impl Bootstrap {
    /// Read the bootstrap document named by `config`.
    pub fn locate(config: &EditorConfig) -> Result<Self, BridgeError> {
        let path = config.bootstrap_path();
        if !path.is_file() {
            return Err(BridgeError::BootstrapMissing { path });
        }
        let html = std::fs::read_to_string(&path).map_err(|source| {
            BridgeError::BootstrapUnreadable {
                path: path.clone(),
                source,
            }
        })?;
        let dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        let base_url = format!("file://{}/", dir.display());
        tracing::debug!(target: "weaver::richedit", path = %path.display(), "located bootstrap");
        Ok(Self {
            html,
            base_url,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rich_editor.html"), "<body></body>").unwrap();
        let config = EditorConfig {
            resource_dir: dir.path().to_path_buf(),
            ..EditorConfig::default()
        };

        let bootstrap = Bootstrap::locate(&config).unwrap();
        assert_eq!(bootstrap.html, "<body></body>");
        assert!(bootstrap.base_url.starts_with("file://"));
        assert!(bootstrap.base_url.ends_with('/'));
    }

    #[test]
    fn test_missing_document_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig {
            resource_dir: dir.path().to_path_buf(),
            ..EditorConfig::default()
        };

        match Bootstrap::locate(&config) {
            Err(BridgeError::BootstrapMissing { path }) => {
                assert!(path.ends_with("rich_editor.html"))
            }
            other => panic!("expected BootstrapMissing, got {:?}", other),
        }
    }
}
