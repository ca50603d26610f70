//! TOML-based application configuration.
//!
//! Stores the session timer tunables:
//! - Default time limit offered in the picker
//! - Warning threshold and display time
//! - Cooldown length and what happens when it runs out
//! - Dev mode (one tick counts as a minute)
//!
//! Configuration is stored at `~/.config/mindora/config.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::error::{ConfigError, CoreError};
use crate::session::{CooldownExpiry, SessionPolicy, TimeLimit, DEFAULT_COOLDOWN_SECS};

/// Session timer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_limit_minutes")]
    pub default_limit_minutes: u32,
    #[serde(default = "default_warning_threshold_secs")]
    pub warning_threshold_secs: u64,
    #[serde(default = "default_warning_display_secs")]
    pub warning_display_secs: u64,
    #[serde(default = "default_extension_confirm_secs")]
    pub extension_confirm_secs: u64,
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    #[serde(default)]
    pub cooldown_expiry: CooldownExpiry,
    /// Accelerate the timer for demos.
    #[serde(default)]
    pub dev_mode: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/mindora/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
}

/// Upper bound for the warning and confirmation timings.
const MAX_DISPLAY_SECS: u64 = 60 * 60;
/// Upper bound for the rest period: one week.
const MAX_COOLDOWN_SECS: u64 = 7 * 24 * 60 * 60;

// Default functions
fn default_limit_minutes() -> u32 {
    15
}
fn default_warning_threshold_secs() -> u64 {
    120
}
fn default_warning_display_secs() -> u64 {
    5
}
fn default_extension_confirm_secs() -> u64 {
    3
}
fn default_cooldown_secs() -> u64 {
    DEFAULT_COOLDOWN_SECS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_limit_minutes: default_limit_minutes(),
            warning_threshold_secs: default_warning_threshold_secs(),
            warning_display_secs: default_warning_display_secs(),
            extension_confirm_secs: default_extension_confirm_secs(),
            cooldown_secs: default_cooldown_secs(),
            cooldown_expiry: CooldownExpiry::default(),
            dev_mode: false,
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
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot set a whole section".to_string()))
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
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
            other => Some(other.to_string()),
        }
    }

    /// Every leaf value keyed by its dot path, as `get` would return it.
    pub fn entries(&self) -> BTreeMap<String, String> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut BTreeMap<String, String>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (name, child) in map {
                        let path = if prefix.is_empty() {
                            name.clone()
                        } else {
                            format!("{prefix}.{name}")
                        };
                        walk(&path, child, out);
                    }
                }
                serde_json::Value::String(s) => {
                    out.insert(prefix.to_string(), s.clone());
                }
                other => {
                    out.insert(prefix.to_string(), other.to_string());
                }
            }
        }

        let mut out = BTreeMap::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }

    /// Set a config value by key in memory, validating the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.set_value(key, value)?;
        self.save()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.session;
        TimeLimit::from_minutes(s.default_limit_minutes).map_err(|e| {
            ConfigError::InvalidValue {
                key: "session.default_limit_minutes".to_string(),
                message: e.to_string(),
            }
        })?;

        let bounded = [
            ("session.warning_threshold_secs", s.warning_threshold_secs, MAX_DISPLAY_SECS),
            ("session.warning_display_secs", s.warning_display_secs, MAX_DISPLAY_SECS),
            ("session.extension_confirm_secs", s.extension_confirm_secs, MAX_DISPLAY_SECS),
            ("session.cooldown_secs", s.cooldown_secs, MAX_COOLDOWN_SECS),
        ];
        for (key, value, max) in bounded {
            if value > max {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("{value} exceeds the maximum of {max} seconds"),
                });
            }
        }
        Ok(())
    }

    pub fn default_limit(&self) -> TimeLimit {
        TimeLimit::from_minutes(self.session.default_limit_minutes).unwrap_or_default()
    }

    /// Timer tunables. Dev mode replaces the increment and threshold.
    pub fn session_policy(&self) -> SessionPolicy {
        let s = &self.session;
        let base = SessionPolicy {
            tick_increment_secs: 1,
            warning_threshold_secs: s.warning_threshold_secs,
            warning_display: Duration::from_secs(s.warning_display_secs),
            extension_confirm: Duration::from_secs(s.extension_confirm_secs),
            cooldown_secs: s.cooldown_secs,
            cooldown_expiry: s.cooldown_expiry,
        };
        if s.dev_mode {
            let dev = SessionPolicy::dev();
            SessionPolicy {
                tick_increment_secs: dev.tick_increment_secs,
                warning_threshold_secs: dev.warning_threshold_secs,
                ..base
            }
        } else {
            base
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default config");
            Self::default()
        })
    }
}
