//! Toolkit configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::DEFAULT_CACHE_CAPACITY;
use crate::error::LoadError;
use crate::message_box::DEFAULT_TEXT_SIZE;

/// Settings a host passes to [`Gui::with_config`](crate::container::Gui::with_config).
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Directory skin paths are resolved against.
    pub asset_root: PathBuf,
    /// Decoded images kept in the texture cache.
    pub texture_cache_capacity: usize,
    /// Text size for widgets that do not specify one.
    pub font_size: u32,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("."),
            texture_cache_capacity: DEFAULT_CACHE_CAPACITY,
            font_size: DEFAULT_TEXT_SIZE,
        }
    }
}

impl ToolkitConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded toolkit config");
        Ok(config)
    }
}
