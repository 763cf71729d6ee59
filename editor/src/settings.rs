//! Editor settings loaded from `settings.toml`.
//!
//! ```toml
//! [history]
//! max_undo = 200
//! ```
//!
//! Every section and field is optional and falls back to its default.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vellum_core::abstract_editor::DEFAULT_MAX_UNDO;

/// Errors raised while loading [`EditorSettings`].
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("history.max_undo must be at least 1")]
    ZeroUndoDepth,
}

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub history: HistorySettings,
}

/// Undo/redo history configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo steps kept before the oldest is dropped.
    pub max_undo: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_undo: DEFAULT_MAX_UNDO,
        }
    }
}

impl EditorSettings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.history.max_undo == 0 {
            return Err(SettingsError::ZeroUndoDepth);
        }
        Ok(())
    }
}

/// Load editor settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<EditorSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = EditorSettings::from_toml_str(&content)?;
    log::info!(
        "Loaded settings from {} (max undo {})",
        path.display(),
        settings.history.max_undo
    );
    Ok(settings)
}
