//! Engine configuration, read from `atelier.toml` when present.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::StoreResult;

/// Tunables for tree assembly and style aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub styles: StyleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Deepest nesting assembled before a branch is cut off.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    64
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// `position` when nothing binds it.
    #[serde(default = "default_position")]
    pub default_position: String,
    /// `flexDirection` when `display` is `flex` and no direction is set.
    #[serde(default = "default_flex_direction")]
    pub default_flex_direction: String,
    /// Wrap bare `backgroundImage` values in `url(...)`.
    #[serde(default = "default_true")]
    pub wrap_background_image: bool,
}

fn default_position() -> String {
    "static".to_string()
}

fn default_flex_direction() -> String {
    "row".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            default_position: default_position(),
            default_flex_direction: default_flex_direction(),
            wrap_background_image: true,
        }
    }
}

impl EngineConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> StoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads configuration from `path`.
    /// Falls back to defaults with a warning when the file is unreadable or invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No engine config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded engine config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse engine config {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read engine config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
