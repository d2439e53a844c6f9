//! Configuration loading and management for imagery-stats.
//!
//! Loads settings from `imagery-stats.toml` with environment variable overrides.
//! Every field has a default, so the tool runs without any config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "imagery-stats.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tasking Manager API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the v2 API, without trailing slash
    pub base_url: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Per-request timeout ceiling in seconds
    pub timeout_secs: u64,
}

/// Listing and sampling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Number of project identifiers to sample
    pub max_projects: usize,
    /// Upper bound on listing pages to walk
    pub max_pages: u32,
    /// Project statuses accepted by the listing filter
    pub statuses: Vec<String>,
    pub order_by: String,
    pub order_by_type: String,
}

/// Output artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination of the summary document
    pub path: PathBuf,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults
    /// when no config file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::read_file(&path)?,
            None => Config::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var("TM_API_BASE") {
            self.api.base_url = base;
        }
        if let Ok(path) = std::env::var("IMAGERY_STATS_OUTPUT") {
            self.output.path = PathBuf::from(path);
        }
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
    }

    /// Reject values that would make the run meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if reqwest::Url::parse(&self.api.base_url).is_err() {
            return Err(ConfigError::Invalid {
                field: "api.base_url",
                reason: format!("not a valid URL: {}", self.api.base_url),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "api.timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.fetch.max_projects == 0 {
            return Err(ConfigError::Invalid {
                field: "fetch.max_projects",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.fetch.max_pages == 0 {
            return Err(ConfigError::Invalid {
                field: "fetch.max_pages",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.fetch.statuses.iter().all(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "fetch.statuses",
                reason: "at least one project status is required".to_string(),
            });
        }
        Ok(())
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("imagery-stats")
            .join(CONFIG_FILE_NAME);
        home_config.exists().then_some(home_config)
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FetchConfig {
    /// Comma-joined status filter as the listing endpoint expects it
    pub fn status_filter(&self) -> String {
        self.statuses
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://tasking-manager-tm4-production-api.hotosm.org/api/v2".to_string(),
            user_agent: "HOT-ImageryStats-SampleFetch/1.0".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_projects: 100,
            max_pages: 5,
            statuses: vec!["PUBLISHED".to_string(), "ARCHIVED".to_string()],
            order_by: "last_updated".to_string(),
            order_by_type: "DESC".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("docs/projects_summary.json"),
        }
    }
}
