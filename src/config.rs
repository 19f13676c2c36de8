//! Application configuration
//!
//! Defaults come from `config.toml` embedded at build time. An optional file
//! with the same layout in the user's config directory overrides individual
//! keys. The override is only ever read.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::ConfigError;
use crate::poller::FocusPolicy;

const DEFAULT_CONFIG_TOML: &str = include_str!("../config.toml");

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Config {
    pub clipboard: ClipboardConfig,
    pub window: WindowConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ClipboardConfig {
    pub poll_interval_ms: u64,
    /// Initial checkbox state
    pub auto_capture: bool,
    pub focus_policy: FocusPolicy,
}

impl ClipboardConfig {
    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MetricsConfig {
    pub show_details: bool,
    pub manuscript_page_chars: usize,
}

/// Path of the optional user override
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("charcount").join("config.toml"))
}

/// Load the embedded defaults merged with the user override, if present
pub(crate) fn load() -> Result<Config, ConfigError> {
    let overrides = match user_config_path() {
        Some(path) if path.exists() => Some(read_override(&path)?),
        _ => None,
    };
    from_sources(DEFAULT_CONFIG_TOML, overrides.as_deref())
}

fn read_override(path: &Path) -> Result<String, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Loaded configuration overrides from {:?}", path);
    Ok(contents)
}

/// Parse `defaults`, apply `overrides` on top, and validate the result
pub(crate) fn from_sources(defaults: &str, overrides: Option<&str>) -> Result<Config, ConfigError> {
    let mut table = parse_table(defaults, "embedded config.toml")?;
    if let Some(overrides) = overrides {
        let overrides = parse_table(overrides, "user config.toml")?;
        merge(&mut table, overrides);
    }

    let config: Config = toml::Value::Table(table)
        .try_into()
        .map_err(|e| ConfigError::Parse {
            origin: "merged configuration".to_string(),
            source: e,
        })?;
    config.validate()?;
    Ok(config)
}

fn parse_table(source: &str, origin: &str) -> Result<toml::Table, ConfigError> {
    toml::from_str(source).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        source: e,
    })
}

/// Recursively overlay `overrides` onto `base`
fn merge(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_child)), toml::Value::Table(child)) => {
                merge(base_child, child);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.clipboard.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "clipboard.poll_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.metrics.manuscript_page_chars == 0 {
            return Err(ConfigError::Invalid {
                key: "metrics.manuscript_page_chars",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "window",
                reason: format!(
                    "size must be positive, got {}x{}",
                    self.window.width, self.window.height
                ),
            });
        }
        Ok(())
    }
}
