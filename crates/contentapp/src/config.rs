//! # Configuration
//!
//! Engine settings are managed by [`confique`]: every key has a compiled default,
//! and a TOML file can override any subset of them.
//!
//! ## Resolution Order
//!
//! 1. **Config file**: passed explicitly to [`EngineConfig::load`].
//! 2. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! The engine never looks for a file on its own; the surrounding application
//! decides where configuration lives.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_page_size` | `25` | Page size when the caller gives none |
//! | `max_page_size` | `100` | Upper bound for requested page sizes |
//! | `title_max_len` | `300` | Maximum title length, in characters |
//! | `file_name_max_len` | `300` | Maximum file name length |
//! | `copyright_max_len` | `500` | Maximum copyright length |
//! | `type_name_max_len` | `100` | Maximum metadata type name length |
//! | `value_name_max_len` | `300` | Maximum metadata value name length |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Page size used when a listing request does not specify one.
    #[config(default = 25)]
    pub default_page_size: usize,

    /// Requested page sizes are clamped to this value.
    #[config(default = 100)]
    pub max_page_size: usize,

    #[config(default = 300)]
    pub title_max_len: usize,

    #[config(default = 300)]
    pub file_name_max_len: usize,

    #[config(default = 500)]
    pub copyright_max_len: usize,

    #[config(default = 100)]
    pub type_name_max_len: usize,

    #[config(default = 300)]
    pub value_name_max_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_page_size: 25,
            max_page_size: 100,
            title_max_len: 300,
            file_name_max_len: 300,
            copyright_max_len: 500,
            type_name_max_len: 100,
            value_name_max_len: 300,
        }
    }
}

impl EngineConfig {
    /// Load settings from a TOML file, falling back to defaults for missing keys.
    /// A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Self::builder().file(path).load()?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// Clamp a requested page size into `1..=max_page_size`, using the default
    /// when none was requested.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}
