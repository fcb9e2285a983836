use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::page::PageSize;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub page: PageSection,
    pub font: FontConfig,
    pub styles: StylesConfig,
    pub checkbox: CheckboxConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct PageSection {
    pub size: PageSize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Family name the bundled face must report
    pub family: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "DejaVu Sans".to_string(),
        }
    }
}

/// Visual attributes of one named text style. All three keys are required
/// when a style table is present.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StyleConfig {
    pub font_size: f64,
    pub leading: f64,
    pub space_after: f64,
}

impl StyleConfig {
    const fn new(font_size: f64, leading: f64, space_after: f64) -> Self {
        Self {
            font_size,
            leading,
            space_after,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    pub normal: StyleConfig,
    pub heading1: StyleConfig,
    pub heading2: StyleConfig,
    pub heading3: StyleConfig,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            normal: StyleConfig::new(10.0, 12.0, 0.0),
            heading1: StyleConfig::new(24.0, 29.0, 0.0),
            heading2: StyleConfig::new(20.0, 24.0, 0.0),
            heading3: StyleConfig::new(16.0, 19.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CheckboxConfig {
    pub font_size: f64,
    pub space_after: f64,
}

impl Default for CheckboxConfig {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            space_after: 10.0,
        }
    }
}

impl Config {
    /// The defaults compiled into the binary from `default_config.toml`.
    pub fn compiled_default() -> Self {
        // build.rs already rejected a malformed file
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::compiled_default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
