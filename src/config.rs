//! Print settings persistence
//!
//! Defaults for every conversion live in `~/.config/pyprint/config.yaml`.
//! Command-line flags override individual values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::{FontFamily, Margins, PageSize, PageStyle};
use crate::theme::{Theme, DEFAULT_THEME_ID};

/// Settings applied to every converted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Theme id or path to a theme YAML file
    pub theme: String,
    pub font: FontFamily,
    pub font_size: f32,
    /// Distance between baselines in points
    pub leading: f32,
    pub margins: Margins,
    pub page_size: PageSize,
    pub tab_width: usize,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME_ID.to_string(),
            font: FontFamily::Courier,
            font_size: 9.0,
            leading: 12.0,
            margins: Margins::default(),
            page_size: PageSize::A4,
            tab_width: 4,
        }
    }
}

impl PrintConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`. A missing, unreadable or invalid file falls
    /// back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse config YAML. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| e.to_string())
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    /// Build and validate the page style, taking the background from `theme`
    pub fn page_style(&self, theme: &Theme) -> Result<PageStyle, String> {
        let style = PageStyle {
            page_size: self.page_size,
            margins: self.margins,
            font: self.font,
            font_size: self.font_size,
            leading: self.leading,
            tab_width: self.tab_width,
            background: theme.background,
        };
        style.validate()?;
        Ok(style)
    }
}
