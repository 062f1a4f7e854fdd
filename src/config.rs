use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CapsuleConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub autosave: AutosaveConfig,
    pub insight: InsightConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AutosaveConfig {
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InsightConfig {
    pub provider: String,
    pub model: String,
    pub base_url: String,
    /// Empty means not configured; insights fall back to a fixed message.
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_capsule_dir()
            .join("capsules.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl AutosaveConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".into(),
            model: "gemini-1.5-flash".into(),
            base_url: "https://generativelanguage.googleapis.com".into(),
            api_key: String::new(),
            timeout_secs: 20,
        }
    }
}

/// Returns `~/.daycapsule/`, or `./.daycapsule/` when there is no home directory.
pub fn default_capsule_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".daycapsule")
}

/// Returns the default config file path: `~/.daycapsule/config.toml`
pub fn default_config_path() -> PathBuf {
    default_capsule_dir().join("config.toml")
}

impl CapsuleConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            CapsuleConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (DAYCAPSULE_DB, DAYCAPSULE_LOG_LEVEL, GEMINI_API_KEY).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DAYCAPSULE_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("DAYCAPSULE_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("GEMINI_API_KEY") {
            self.insight.api_key = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
