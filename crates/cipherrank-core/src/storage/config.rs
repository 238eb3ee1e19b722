//! TOML-based application configuration.
//!
//! Stores:
//! - Cycle length, starting countdown and tick period
//! - Reveal gate defaults and policy
//!
//! Configuration is stored at `~/.config/cipherrank/config.toml`. Cycle state
//! itself is never persisted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::cycle::{CycleClock, CycleDuration, DEFAULT_CYCLE_SECS};
use crate::error::{ConfigError, Result, ValidationError};
use crate::reveal::{RevealGate, RevealPolicy};

/// Cycle clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleConfig {
    #[serde(default = "default_total_duration_secs")]
    pub total_duration_secs: u64,
    #[serde(default = "default_start_days")]
    pub start_days: u64,
    #[serde(default = "default_start_hours")]
    pub start_hours: u8,
    #[serde(default = "default_start_minutes")]
    pub start_minutes: u8,
    #[serde(default = "default_start_seconds")]
    pub start_seconds: u8,
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,
}

/// Reveal gate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default)]
    pub policy: RevealPolicy,
    #[serde(default)]
    pub initially_revealed: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/cipherrank/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cycle: CycleConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
}

fn default_total_duration_secs() -> u64 {
    DEFAULT_CYCLE_SECS
}
fn default_start_days() -> u64 {
    2
}
fn default_start_hours() -> u8 {
    14
}
fn default_start_minutes() -> u8 {
    32
}
fn default_start_seconds() -> u8 {
    45
}
fn default_tick_period_ms() -> u64 {
    1000
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            total_duration_secs: default_total_duration_secs(),
            start_days: default_start_days(),
            start_hours: default_start_hours(),
            start_minutes: default_start_minutes(),
            start_seconds: default_start_seconds(),
            tick_period_ms: default_tick_period_ms(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                return Err(unknown());
            }
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => serde_json::Value::Number(
                    value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                        .into(),
                ),
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config missing, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Starting countdown for a new board.
    pub fn starting_remaining(&self) -> Result<CycleDuration, ValidationError> {
        CycleDuration::new(
            self.cycle.start_days,
            self.cycle.start_hours,
            self.cycle.start_minutes,
            self.cycle.start_seconds,
        )
    }

    pub fn clock(&self) -> Result<CycleClock, ValidationError> {
        Ok(CycleClock::new(
            self.starting_remaining()?,
            self.cycle.total_duration_secs,
        ))
    }

    pub fn gate(&self) -> RevealGate {
        RevealGate::new(self.reveal.initially_revealed)
    }

    /// Interval between ticks. A zero period is rejected by
    /// [`CycleDriver::spawn`](crate::driver::CycleDriver::spawn).
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.cycle.tick_period_ms)
    }
}
