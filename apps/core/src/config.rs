use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_INSTANCE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CACHE_MINUTES: u64 = 15;
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub instance_url: String,
    pub api_key: String,
    pub cache_length_minutes: u64,
    pub page_limit: u64,
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = std::env::temp_dir().join("deckmark");
        Self {
            instance_url: DEFAULT_INSTANCE_URL.to_string(),
            api_key: String::new(),
            cache_length_minutes: DEFAULT_CACHE_MINUTES,
            page_limit: DEFAULT_PAGE_LIMIT,
            config_path: base.join("config.toml"),
        }
    }
}

impl Config {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.cache_length_minutes.max(1) * 60)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "config io error: {error}"),
            Self::Parse(error) => write!(f, "config parse error: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    instance_url: Option<String>,
    api_key: Option<String>,
    cache_length_minutes: Option<u64>,
    page_limit: Option<u64>,
}

/// Loads config from the given path (or the default location). A missing
/// file yields defaults; the minute and page-limit fields are clamped to at
/// least 1 on the way in.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    if let Some(path) = path {
        config.config_path = path.to_path_buf();
    }

    match std::fs::read_to_string(&config.config_path) {
        Ok(raw) => {
            let file: ConfigFile =
                toml::from_str(&raw).map_err(|error| ConfigError::Parse(error.to_string()))?;
            if let Some(instance_url) = file.instance_url {
                config.instance_url = instance_url.trim_end_matches('/').to_string();
            }
            if let Some(api_key) = file.api_key {
                config.api_key = api_key;
            }
            if let Some(minutes) = file.cache_length_minutes {
                config.cache_length_minutes = minutes;
            }
            if let Some(page_limit) = file.page_limit {
                config.page_limit = page_limit;
            }
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
        Err(error) => return Err(ConfigError::Io(error)),
    }

    config.cache_length_minutes = config.cache_length_minutes.max(1);
    config.page_limit = config.page_limit.max(1);
    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = config.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = ConfigFile {
        instance_url: Some(config.instance_url.clone()),
        api_key: Some(config.api_key.clone()),
        cache_length_minutes: Some(config.cache_length_minutes),
        page_limit: Some(config.page_limit),
    };
    let raw =
        toml::to_string_pretty(&file).map_err(|error| ConfigError::Parse(error.to_string()))?;
    std::fs::write(&config.config_path, raw)?;
    Ok(())
}

/// An empty instance URL is deliberately allowed: startup with bad
/// credentials is not validated up front, the fetch just fails through the
/// normal remote error path.
pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.cache_length_minutes == 0 {
        return Err("cache_length_minutes must be at least 1".into());
    }

    if cfg.page_limit == 0 {
        return Err("page_limit must be at least 1".into());
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }

    Ok(())
}
