use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TodoError;
use crate::store::DEFAULT_TASKS_FILE;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "config.json";

/// Model named in every completion request unless configured otherwise
pub const DEFAULT_MODEL: &str = "deepseek-chat";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bearer token for the completion endpoint
    pub api_key: String,

    /// URL of the chat-completion endpoint
    pub api_endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_tasks_file")]
    pub tasks_file: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_tasks_file() -> PathBuf {
    PathBuf::from(DEFAULT_TASKS_FILE)
}

fn default_log_level() -> Option<String> {
    Some("info".to_string())
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .field("model", &self.model)
            .field("tasks_file", &self.tasks_file)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Create a config with defaults for everything but the credentials
    pub fn new(api_key: impl Into<String>, api_endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_endpoint: api_endpoint.into(),
            model: default_model(),
            tasks_file: default_tasks_file(),
            log_level: default_log_level(),
        }
    }

    /// Load configuration with fallback chain
    ///
    /// A missing or unreadable configuration is an error: the application
    /// cannot start without credentials.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it is the only candidate
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        Self::load_first_existing(&Self::default_locations())
    }

    /// `./config.json`, then `~/.config/<project>/<project>.yml`
    pub fn default_locations() -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];

        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        candidates
    }

    /// Load the first candidate that exists on disk
    pub fn load_first_existing(candidates: &[PathBuf]) -> Result<Self> {
        for path in candidates {
            if path.exists() {
                return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
            }
        }

        let searched: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        Err(eyre::eyre!("No config file found (searched: {})", searched.join(", ")))
    }

    /// Parse one file; `.yml`/`.yaml` as YAML, anything else as JSON
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yml") | Some("yaml")
        );

        let config: Self = if is_yaml {
            serde_yaml::from_str(&content).context("Failed to parse config file")?
        } else {
            serde_json::from_str(&content).context("Failed to parse config file")?
        };

        config.validate()?;

        log::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Reject blank credentials
    pub fn validate(&self) -> std::result::Result<(), TodoError> {
        if self.api_key.trim().is_empty() {
            return Err(TodoError::Config("api_key must not be empty".to_string()));
        }
        if self.api_endpoint.trim().is_empty() {
            return Err(TodoError::Config("api_endpoint must not be empty".to_string()));
        }
        Ok(())
    }
}
