use crate::cli::ListFormat;
use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ANON_KEY_ENV: &str = "BEAUTYAI_ANON_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub backend: Option<BackendConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Local catalog, history, cart and session files live here
    pub data_dir: PathBuf,
    pub color: bool,
    /// Artificial latency of the simulated analyzer
    pub analysis_delay_ms: u64,
    #[serde(default)]
    pub format: Option<ListFormat>,
}

/// Hosted database and auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    #[serde(
        default,
        serialize_with = "crate::utils::format::serialize_option_string",
        deserialize_with = "crate::utils::format::deserialize_option_string"
    )]
    pub anon_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig {
                data_dir: Self::config_dir(),
                color: true,
                analysis_delay_ms: 1500,
                format: None,
            },
            backend: None,
        }
    }
}

impl BackendConfig {
    /// Anon key from config, falling back to the environment
    pub fn resolve_anon_key(&self) -> Option<String> {
        self.resolve_anon_key_with(std::env::var(ANON_KEY_ENV).ok())
    }

    /// Same as [`resolve_anon_key`](Self::resolve_anon_key) with the environment value given
    pub fn resolve_anon_key_with(&self, env_key: Option<String>) -> Option<String> {
        self.anon_key
            .clone()
            .filter(|key| !key.is_empty())
            .or(env_key)
            .filter(|key| !key.is_empty())
    }
}

impl GeneralConfig {
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }
}

impl Config {
    pub fn ensure_config_exists() -> AppResult<()> {
        let config_path = Self::config_file_path();
        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
        }
        Ok(())
    }

    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(config_path)?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::System(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.general.data_dir.as_os_str().is_empty() {
            return Err(AppError::System("Data directory cannot be empty".to_string()));
        }

        if let Some(backend) = &self.backend {
            if backend.url.trim().is_empty() {
                return Err(AppError::System("Backend URL cannot be empty".to_string()));
            }

            if !(backend.url.starts_with("http://") || backend.url.starts_with("https://")) {
                return Err(AppError::System(
                    "Backend URL must start with http:// or https://".to_string(),
                ));
            }

            if backend.resolve_anon_key().is_none() {
                return Err(AppError::System(format!(
                    "An anon key is required for the hosted backend. Set it in config or use the {} environment variable",
                    ANON_KEY_ENV
                )));
            }
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::System(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;

        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("beautyai")
    }
}
