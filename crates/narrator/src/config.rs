//! Configuration loading for the narrator.
//!
//! Settings are loaded from a TOML file. Every section is optional.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use battle_protocol::Perspective;
use serde::{Deserialize, Serialize};

use crate::templates::{TemplateError, TemplateStore};

/// Complete narrator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// Renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,
    /// Template dictionary settings
    #[serde(default)]
    pub templates: TemplatesConfig,
}

impl NarratorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads the configured template dictionary, or the bundled one when no
    /// path is set.
    pub fn load_templates(&self) -> Result<Arc<TemplateStore>, TemplateError> {
        match &self.templates.path {
            Some(path) => Ok(Arc::new(TemplateStore::from_file(path)?)),
            None => Ok(TemplateStore::bundled()),
        }
    }
}

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Side narrated as "own" (0 or 1)
    pub perspective: Perspective,
    /// Generation assumed until a `gen` event arrives
    pub generation: u8,
    /// Player 1 name until a `player` event arrives
    pub player1: String,
    /// Player 2 name until a `player` event arrives
    pub player2: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            perspective: Perspective::P1,
            generation: 8,
            player1: "Player 1".to_string(),
            player2: "Player 2".to_string(),
        }
    }
}

/// Template dictionary settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Override dictionary (TOML, or JSON by extension)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error serializing config
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Narrator Configuration

[renderer]
# Side narrated as "own": 0 for player 1, 1 for player 2
perspective = 0
# Generation assumed until the log announces one
generation = 8
player1 = "Player 1"
player2 = "Player 2"

[templates]
# Optional override dictionary (.toml or .json)
# path = "text.json"
"#
    .to_string()
}
