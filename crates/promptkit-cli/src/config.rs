//! Configuration management for PromptKit CLI
//!
//! Stores the catalog location, draft settings and log level in
//! ~/.config/promptkit/config.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use promptkit::{DEFAULT_AUTOSAVE_DELAY, DEFAULT_DRAFT_FRESHNESS_HOURS};

const CONFIG_DIR: &str = "promptkit";
const CONFIG_FILE: &str = "config.toml";
const DRAFTS_FILE: &str = "drafts.json";

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Template catalog (JSON); the bundled catalog when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Draft file; the user data directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drafts_path: Option<PathBuf>,
    #[serde(default = "default_draft_freshness_hours")]
    pub draft_freshness_hours: i64,
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,
    /// Default tracing filter, overridden by PROMPTKIT_LOG / RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_draft_freshness_hours() -> i64 {
    DEFAULT_DRAFT_FRESHNESS_HOURS
}

fn default_autosave_debounce_ms() -> u64 {
    DEFAULT_AUTOSAVE_DELAY.as_millis() as u64
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            drafts_path: None,
            draft_freshness_hours: default_draft_freshness_hours(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).with_context(|| "Failed to parse config file")?;
        config.draft_freshness()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Resolved draft file path
    pub fn drafts_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.drafts_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .context("Could not determine data directory")?
            .join(CONFIG_DIR);
        Ok(data_dir.join(DRAFTS_FILE))
    }

    pub fn draft_freshness(&self) -> Result<chrono::Duration> {
        let hours = self.draft_freshness_hours;
        if hours < 0 {
            bail!("draft_freshness_hours must not be negative, got {}", hours);
        }
        chrono::Duration::try_hours(hours)
            .with_context(|| format!("draft_freshness_hours is out of range: {}", hours))
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config = Config::parse("catalog = \"/tmp/prompts.json\"").unwrap();

        assert_eq!(config.catalog, Some(PathBuf::from("/tmp/prompts.json")));
        assert_eq!(config.draft_freshness_hours, 24);
        assert_eq!(config.autosave_debounce_ms, 1000);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_explicit_drafts_path() {
        let config = Config {
            drafts_path: Some(PathBuf::from("/tmp/drafts.json")),
            ..Config::default()
        };
        assert_eq!(config.drafts_path().unwrap(), PathBuf::from("/tmp/drafts.json"));
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = Config {
            autosave_debounce_ms: 250,
            ..Config::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();

        assert_eq!(parsed.autosave_delay(), Duration::from_millis(250));
        assert_eq!(parsed.draft_freshness().unwrap(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_out_of_range_freshness_is_rejected() {
        assert!(Config::parse("draft_freshness_hours = 9223372036854775807").is_err());
        assert!(Config::parse("draft_freshness_hours = -1").is_err());
        assert!(Config::parse("draft_freshness_hours = 48").is_ok());

        let config = Config {
            draft_freshness_hours: i64::MAX,
            ..Config::default()
        };
        assert!(config.draft_freshness().is_err());
    }
}
