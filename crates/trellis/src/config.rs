//! Runtime configuration, read from TOML.
//!
//! ```toml
//! [window]
//! default_width = 1024
//! default_height = 768
//! screen_width = 1920
//! screen_height = 1080
//! decoration_width = 2
//!
//! [log]
//! level = "debug"
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use trellis_geom::Size;

use crate::error::Result;

/// Window metrics used when the backend does not supply its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Default width of main and wizard dialogs.
    pub default_width: u32,
    /// Default height of main and wizard dialogs.
    pub default_height: u32,
    /// Screen width; dialogs are clamped to it when set.
    pub screen_width: Option<u32>,
    /// Screen height; dialogs are clamped to it when set.
    pub screen_height: Option<u32>,
    /// Width of the window frame around dialog content.
    pub decoration_width: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_width: 800,
            default_height: 600,
            screen_width: None,
            screen_height: None,
            decoration_width: 0,
        }
    }
}

impl WindowConfig {
    /// Default dialog size.
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    /// Screen size, if both dimensions are known.
    pub fn screen_size(&self) -> Option<Size> {
        Some(Size::new(self.screen_width?, self.screen_height?))
    }
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Maximum level: one of `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Window metrics.
    pub window: WindowConfig,
    /// Logging options.
    pub log: LogConfig,
}

impl Config {
    /// Parse configuration from a TOML string. Missing keys take their
    /// defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}
