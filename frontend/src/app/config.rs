use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Mutex;

pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

/// Looked up in order; the first file found wins
const CONFIG_PATHS: [&str; 2] = ["../config.json", "config.json"];

pub static CACHED_CONFIG: Lazy<Mutex<Option<Config>>> = Lazy::new(|| Mutex::new(None));
pub static MISSING_CONFIG_REPORTED: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(false));

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_city")]
    pub city: String,
    /// Optional JSON catalog replacing the built-in ski areas
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

fn default_city() -> String {
    openweathermap::DEFAULT_CITY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            city: default_city(),
            catalog: None,
        }
    }
}

impl Config {
    /// A non-empty key from the environment wins over the file
    pub fn with_env_override(mut self, env_key: Option<String>) -> Self {
        if let Some(key) = env_key.filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    serde_json::from_str(content).context("Invalid config.json")
}

pub fn load_config() -> Result<Config> {
    // Check cache first
    {
        let cache = CACHED_CONFIG.lock().map_err(|_| anyhow!("config cache poisoned"))?;
        if let Some(config) = cache.as_ref() {
            return Ok(config.clone());
        }
    }

    let from_file = CONFIG_PATHS
        .iter()
        .find_map(|path| std::fs::read_to_string(path).ok().map(|content| (*path, content)));

    let config = match from_file {
        Some((path, content)) => {
            info!("Loading configuration from {}", path);
            parse_config(&content)?
        }
        None => {
            // Warn only once
            let mut reported = MISSING_CONFIG_REPORTED
                .lock()
                .map_err(|_| anyhow!("config cache poisoned"))?;
            if !*reported {
                *reported = true;
                warn!("config.json not found, using defaults");
            }
            Config::default()
        }
    };
    let config = config.with_env_override(std::env::var(API_KEY_ENV).ok());

    // Cache the configuration
    {
        let mut cache = CACHED_CONFIG.lock().map_err(|_| anyhow!("config cache poisoned"))?;
        *cache = Some(config.clone());
    }
    Ok(config)
}
