//! Application configuration management.
//!
//! Configuration is stored at `~/.config/vetclinic/config.json`; the backend
//! project URL and anon key may also come from the environment
//! (`VETCLINIC_BACKEND_URL`, `VETCLINIC_ANON_KEY`), which takes precedence.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "vetclinic";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub backend_url: Option<String>,
    pub anon_key: Option<String>,
    pub last_email: Option<String>,
    /// Target the backend redirects to after e-mail confirmation of a sign-up.
    pub confirm_redirect_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the persisted session and log files.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Backend project URL; the environment wins over the config file.
    pub fn resolved_backend_url(&self) -> Result<String> {
        std::env::var("VETCLINIC_BACKEND_URL")
            .ok()
            .or_else(|| self.backend_url.clone())
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No backend URL configured (set VETCLINIC_BACKEND_URL or backend_url in config.json)"
                )
            })
    }

    /// Backend anon API key; the environment wins over the config file.
    pub fn resolved_anon_key(&self) -> Result<String> {
        std::env::var("VETCLINIC_ANON_KEY")
            .ok()
            .or_else(|| self.anon_key.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No anon key configured (set VETCLINIC_ANON_KEY or anon_key in config.json)"
                )
            })
    }
}
