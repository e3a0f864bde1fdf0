//! CLI defaults, read from `~/.config/pullrefresh/replay.toml` when present

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_output: String,
    pub log_level: String,
    /// How long `run` keeps going after the last step
    pub settle_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_output: "table".to_string(),
            log_level: "warn".to_string(),
            settle_ms: 1500,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let Some(config_path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&contents)?;

        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        let home = std::env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".config/pullrefresh/replay.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("settle_ms = 3000").unwrap();
        assert_eq!(config.settle_ms, 3000);
        assert_eq!(config.default_output, "table");
        assert_eq!(config.log_level, "warn");
    }
}
