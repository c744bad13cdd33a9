//! Configuration management for deepaudit

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::models::LimitsSnapshot;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Audit engine API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Pipeline limits
    #[serde(default)]
    pub limits: Limits,
}

/// Tunable pipeline limits.
///
/// Every knob the pipeline enforces lives here so deployments can adjust
/// them in config.yaml without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum accepted code size in bytes
    #[serde(default = "default_max_code_size")]
    pub max_code_size: usize,

    /// Per-client request ceiling within the trailing minute
    #[serde(default = "default_rate_limit_per_minute")]
    pub rate_limit_per_minute: usize,

    /// Result cache time-to-live in milliseconds
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,

    /// Remote call timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_max_code_size() -> usize {
    50_000
}

fn default_rate_limit_per_minute() -> usize {
    10
}

fn default_cache_ttl_ms() -> u64 {
    5 * 60 * 1000
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_code_size: default_max_code_size(),
            rate_limit_per_minute: default_rate_limit_per_minute(),
            cache_ttl_ms: default_cache_ttl_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Limits {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn snapshot(&self) -> LimitsSnapshot {
        LimitsSnapshot {
            max_code_size: self.max_code_size,
            rate_limit_per_minute: self.rate_limit_per_minute,
            cache_ttl_ms: self.cache_ttl_ms,
            timeout_ms: self.timeout_ms,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".deepaudit").join("config.yaml"))
    }

    /// Load configuration, preferring an explicit path over the default.
    ///
    /// A missing file yields defaults (the key may still come from the
    /// environment). `DEEPAUDIT_API_KEY` overrides the file value.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_path()?,
        };

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_yaml::from_str(&contents).map_err(ConfigError::from)?
        } else {
            Config::default()
        };

        if let Ok(key) = std::env::var("DEEPAUDIT_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds a credential; keep it private on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Whether a credential is configured (file or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}
