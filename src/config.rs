use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::search::categories::CategorySourceKind;

/// Environment variable prefix; nested keys use `__`
/// (e.g. `LISTING_SEARCH_BACKEND__BASE_URL`).
pub const ENV_PREFIX: &str = "LISTING_SEARCH_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Figment(Box::new(e))
    }
}

/// Result of [`AppConfig::load`], held until logging is up so the outcome
/// can be reported through it.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: AppConfig,
    /// File that was consulted (it may not exist).
    pub path: PathBuf,
    /// Set when loading failed and defaults are in effect.
    pub error: Option<ConfigError>,
}

impl ConfigLoad {
    /// Log where the configuration came from.
    pub fn report(&self) {
        match &self.error {
            Some(e) => log::warn!(
                "Failed to load config from {}: {e}; using defaults",
                self.path.display()
            ),
            None if self.path.exists() => {
                log::info!("Loaded config from {}", self.path.display())
            }
            None => log::debug!("No config file at {}; using defaults", self.path.display()),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub search: SearchConfig,
    pub client: ClientConfig,
    pub tui: TuiConfig,
    pub data: DataConfig,
}

/// Marketplace API location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Per-request timeout. Unset means requests may hang indefinitely.
    pub timeout_secs: Option<u64>,
}

/// Search behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a quick search is issued.
    pub debounce_ms: u64,
    /// How the category sidebar list is produced.
    pub category_source: CategorySourceKind,
}

/// Client identity reported with logged searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// User-agent style signal used for device classification.
    pub user_agent: String,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            category_source: CategorySourceKind::Curated,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("{}/{} (terminal)", crate::NAME, crate::VERSION),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl AppConfig {
    /// Load from `~/.config/listing-search/config.toml` plus environment.
    /// Never fails; on error the defaults are used and the error is kept.
    pub fn load() -> ConfigLoad {
        Self::load_at(Self::config_path())
    }

    /// [`Self::load`] against an explicit file.
    pub fn load_at(path: PathBuf) -> ConfigLoad {
        match Self::load_from(Some(&path)) {
            Ok(config) => ConfigLoad {
                config,
                path,
                error: None,
            },
            Err(e) => ConfigLoad {
                config: Self::default(),
                path,
                error: Some(e),
            },
        }
    }

    /// Layer defaults, the TOML file at `path` (if it exists) and environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = path.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }

        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("listing-search"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.backend.timeout_secs.map(Duration::from_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("listing-search").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
