//! CLI configuration: optional TOML file plus environment overrides.
//!
//! Priority: command-line flags > environment variables > config file > defaults.
//! Flags are applied by the caller after [`MeltConfig::load`].

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use melt_core::language::DEFAULT_LANGUAGE;

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "MELT_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MeltConfig {
    /// Wordlist language: a locale tag (`ja`, `zh-hant`) or English name.
    #[serde(default = "default_language")]
    pub language: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for MeltConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            log_level: default_log_level(),
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// `<config_dir>/melt/config.toml`, e.g. `~/.config/melt/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("melt").join("config.toml"))
}

impl MeltConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: MeltConfig =
            toml::from_str(&contents).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Find and load the config file, then apply env overrides.
    ///
    /// An explicit path or `$MELT_CONFIG` must exist. The default location is
    /// only used when present; without any file the defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(p) => Some(PathBuf::from(p)),
                None => default_config_path().filter(|p| p.is_file()),
            },
        };

        let mut config = match path {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `MELT_LANGUAGE`
    /// - `MELT_LOG_LEVEL`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("MELT_LANGUAGE") {
            self.language = v;
        }
        if let Some(v) = lookup("MELT_LOG_LEVEL") {
            self.log_level = v;
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// Whether the language is actually supported is checked when it is
    /// resolved, so the error names the offending value.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.language.trim().is_empty(),
            "language must not be empty"
        );
        anyhow::ensure!(
            LevelFilter::from_str(&self.log_level).is_ok(),
            "log_level must be one of off, error, warn, info, debug, trace (got {:?})",
            self.log_level
        );
        Ok(())
    }
}
