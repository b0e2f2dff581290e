/// CLI configuration
use crate::error::{CliError, Result};
use coogs_client::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use coogs_favorites::ReconcilePolicy;
use coogs_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "coogs.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub player: PlayerSettings,

    #[serde(default)]
    pub favorites: FavoritesSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Session file; platform data dir when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    #[serde(default = "default_volume")]
    pub volume: u8,

    #[serde(default = "default_history_size")]
    pub history_size: usize,

    #[serde(default)]
    pub repeat: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FavoritesSettings {
    #[serde(default)]
    pub reconcile: ReconcilePolicy,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `file` must exist when given; otherwise `coogs.toml` is used if
    /// present. `COOGS_*` variables override both, with `__` between
    /// section and key (e.g. `COOGS_API__URL`).
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_from(file, environment())
    }

    /// Load configuration using a custom environment source
    pub fn load_from(file: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match file {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(env);

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.url.trim().is_empty() {
            return Err(CliError::Config(
                "API URL is required (set COOGS_API__URL)".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(CliError::Config(
                "API timeout must be at least one second".to_string(),
            ));
        }

        if self.player.volume > 100 {
            return Err(CliError::Config(format!(
                "Player volume must be 0-100, got {}",
                self.player.volume
            )));
        }

        Ok(())
    }

    /// Session file to use
    pub fn session_path(&self) -> PathBuf {
        self.session.path.clone().unwrap_or_else(default_session_path)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.url.clone())
            .with_timeout(Duration::from_secs(self.api.timeout_secs))
    }

    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            history_size: self.player.history_size,
            volume: self.player.volume,
            repeat: self.player.repeat,
        }
    }
}

/// `COOGS_*` environment source
pub fn environment() -> config::Environment {
    config::Environment::with_prefix("COOGS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Default values
fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_volume() -> u8 {
    PlayerConfig::default().volume
}

fn default_history_size() -> usize {
    PlayerConfig::default().history_size
}

fn default_session_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("coogs").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("coogs-session.json"))
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            history_size: default_history_size(),
            repeat: false,
        }
    }
}
