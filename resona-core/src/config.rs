//! Player configuration loaded from `~/.config/resona/config.toml`.

use crate::error::{CoreError, Result};
use crate::player::{RepeatMode, ShuffleMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayerConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub discover: DiscoverConfig,
}

/// Defaults applied when the player starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default)]
    pub shuffle: ShuffleMode,
    #[serde(default)]
    pub repeat: RepeatMode,
    /// Start playing as soon as a new queue is loaded
    #[serde(default = "default_true")]
    pub play_when_ready: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            shuffle: ShuffleMode::default(),
            repeat: RepeatMode::default(),
            play_when_ready: default_true(),
        }
    }
}

/// Podcast discover screen settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverConfig {
    /// ISO 3166-1 alpha-2 country code for the top-feeds chart
    #[serde(default = "default_country")]
    pub country: String,
    /// Number of feeds requested per fetch
    #[serde(default = "default_feed_limit")]
    pub feed_limit: usize,
}

fn default_country() -> String {
    "us".to_string()
}

const fn default_feed_limit() -> usize {
    25
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            feed_limit: default_feed_limit(),
        }
    }
}

impl PlayerConfig {
    /// Get the config file path (~/.config/resona/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from file or create a template on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed. On first
    /// run, a template is written and `ConfigNotFound` is returned so the
    /// caller can point the user at it.
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(&config_path, CONFIG_TEMPLATE)?;
            info!("Wrote config template to {}", config_path.display());

            return Err(CoreError::ConfigNotFound { path: config_path });
        }

        Self::from_toml(&fs::read_to_string(&config_path)?)
    }

    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a field has the
    /// wrong shape, or if validation fails.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;

        if config.discover.country.len() != 2 {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "discover.country must be a two-letter country code, got {:?}",
                    config.discover.country
                ),
            });
        }

        Ok(config)
    }
}

/// Build the commented template written on first run.
#[must_use]
pub fn build_config_template() -> &'static str {
    CONFIG_TEMPLATE
}

const CONFIG_TEMPLATE: &str = r#"# Resona configuration
# ~/.config/resona/config.toml

[playback]
# Shuffle mode applied on startup: "on" or "off"
shuffle = "off"
# Repeat mode applied on startup: "off", "all", or "one"
repeat = "off"
# Start playing as soon as a new queue is loaded
play_when_ready = true

[discover]
# Two-letter country code for the top-podcasts chart
country = "us"
# Number of feeds requested per fetch
feed_limit = 25
"#;
