use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::catalog::models::DEFAULT_ARTWORK_BASE_URL;

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "POKEDEX_API_URL";

/// Configuration loading failures. `AppConfig::load` swallows these and
/// falls back to defaults; `load_from` surfaces them.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub api: ApiConfig,
    pub browser: BrowserConfig,
    pub game: GameConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Catalog service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Image repository path the card and detail views interpolate ids into.
    pub artwork_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// List view paging and debounce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub page_size: u32,
    /// Settle delay before the compute step runs after a change.
    pub debounce_ms: u64,
}

/// Intro guessing game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Show the game before the catalog.
    pub enabled: bool,
    /// Rounds draw ids from `1..=max_id`.
    pub max_id: u32,
    /// Points awarded per correct guess.
    pub reward: u32,
    /// Distractor fetches attempted before a round load gives up.
    pub distractor_attempts: u32,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            artwork_base_url: DEFAULT_ARTWORK_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: 24,
            debounce_ms: 300,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_id: 151,
            reward: 10,
            distractor_attempts: 32,
        }
    }
}

impl BrowserConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/pokedex-tui/config.toml`, then
    /// apply environment overrides.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        let mut config = match Self::load_from(&config_path) {
            Ok(config) => {
                log::info!("Loaded config from {}", config_path.display());
                config
            }
            Err(ConfigError::Read { .. }) => {
                log::debug!(
                    "No config file at {} - using defaults",
                    config_path.display()
                );
                Self::default()
            }
            Err(e) => {
                log::warn!("{e} - using defaults");
                Self::default()
            }
        };
        config.apply_env(std::env::var(API_URL_ENV).ok());
        config
    }

    /// Parse a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            log::info!("Using catalog API from {API_URL_ENV}: {url}");
            self.api.base_url = url;
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("pokedex-tui").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
