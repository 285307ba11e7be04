//! Configuration loading
//!
//! Precedence (highest to lowest): CLI flags (applied by the caller),
//! environment overrides, the config file, built-in defaults.

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable overriding `refreshIntervalSecs`
pub const REFRESH_ENV: &str = "PODMINATOR_REFRESH_SECS";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the root config file (if present) with environment overrides
    pub fn load() -> Result<Config> {
        let path = paths::root_config_path();
        let config = if path.exists() {
            Self::load_file(&path)?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Config::default()
        };
        Ok(Self::apply_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply overrides looked up by environment variable name
    pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        if let Some(value) = lookup(REFRESH_ENV) {
            match value.parse::<u64>() {
                Ok(secs) if secs > 0 => config.refresh_interval_secs = secs,
                _ => tracing::warn!(%value, "Ignoring invalid {}", REFRESH_ENV),
            }
        }
        config
    }
}
