//! User configuration loaded from `~/.virtlab/config.toml`.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Top-level config file shape. Every section is optional; an absent file
/// means defaults everywhere.
#[derive(Debug, Default, Deserialize)]
pub struct LabConfig {
    pub sampling: Option<SamplingConfig>,
    pub ui: Option<UiConfig>,
}

/// `[sampling]` - timing of the synthetic data feed.
#[derive(Debug, Default, Deserialize)]
pub struct SamplingConfig {
    /// Period between samples, in milliseconds. Must be nonzero.
    pub sample_period_ms: Option<u64>,
    /// Total run duration, in milliseconds.
    pub run_duration_ms: Option<u64>,
}

/// `[ui]` - presentation toggles.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct UiConfig {
    /// Use ASCII-only glyphs for badges and bullets.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl LabConfig {
    /// Load the config file, if one exists.
    ///
    /// A missing file (or an undeterminable home directory) is `Ok(None)`;
    /// only an unreadable or unparsable file is an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = Self::path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".virtlab").join("config.toml"))
    }
}
