// ABOUTME: Split pane configuration handling.
// ABOUTME: Loads and saves pane sizes and class names from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::SizeInput;

/// Class names handed to the external stylesheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub container: String,
    /// Applied to both slots
    pub pane: String,
    /// Applied to the left slot in addition to `pane`
    pub left_pane: String,
    pub divider: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            container: "split-pane".to_string(),
            pane: "split-pane__pane".to_string(),
            left_pane: "split-pane__pane--left".to_string(),
            divider: "split-pane__divider".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Starting width of the left pane (pixels, or a string like "50%")
    pub initial_size: SizeInput,

    /// Floor for both panes (pixels, or a percentage up to "50%")
    pub min_size: SizeInput,

    /// Divider thickness in pixels
    pub divider_width: f64,

    /// How far one arrow key press moves the divider, in pixels
    pub keyboard_step: f64,

    pub class_names: ClassNames,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            initial_size: SizeInput::from("50%"),
            min_size: SizeInput::from(100),
            divider_width: 4.0,
            keyboard_step: 10.0,
            class_names: ClassNames::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl SplitConfig {
    pub fn with_initial_size(mut self, size: impl Into<SizeInput>) -> Self {
        self.initial_size = size.into();
        self
    }

    pub fn with_min_size(mut self, size: impl Into<SizeInput>) -> Self {
        self.min_size = size.into();
        self
    }

    /// Get the default config file path (~/.config/split-pane/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("split-pane").join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
