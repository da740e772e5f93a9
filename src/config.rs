use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::models::{LaunchId, DEFAULT_PAGE_SIZE};

const APP_NAME: &str = "launchpad";
const CONFIG_FILE: &str = "config.json";
const CONFIG_ENV: &str = "LAUNCHPAD_CONFIG";
const PAGE_SIZE_ENV: &str = "LAUNCHPAD_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Launches requested per page.
    pub page_size: u32,
    /// Override for the token file location.
    pub token_path: Option<PathBuf>,
    /// Cart contents at startup.
    pub seed_cart: Vec<LaunchId>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            token_path: None,
            seed_cart: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `$LAUNCHPAD_CONFIG` or the user's config
    /// directory, then apply env overrides.
    /// Returns default config if file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let mut config = match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.apply_env();
        config
    }

    fn try_load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Read a config file. A missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var(PAGE_SIZE_ENV) {
            match raw.parse::<u32>() {
                Ok(size) => self.page_size = size,
                Err(_) => tracing::warn!("Ignoring invalid {}={}", PAGE_SIZE_ENV, raw),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        Ok(())
    }
}

fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
