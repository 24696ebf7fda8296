//! TOML-based host configuration.
//!
//! Stores the durable preferences of the focus-session host:
//! - Work and break phase lengths
//! - Where the planner's task export lives
//!
//! Settings are stored at `~/.config/mindstudy/config.toml`. Session
//! state itself is deliberately never persisted; only preferences
//! survive a restart.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::session::SessionConfig;

/// Returns `~/.config/mindstudy[-dev]/` based on MINDSTUDY_ENV.
///
/// Set MINDSTUDY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, SettingsError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MINDSTUDY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("mindstudy-dev")
    } else {
        base_dir.join("mindstudy")
    };

    std::fs::create_dir_all(&dir).map_err(|err| SettingsError::LoadFailed {
        path: dir.clone(),
        message: err.to_string(),
    })?;
    Ok(dir)
}

/// Planner integration configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Path to the planner's JSON task export (optional).
    /// If unset, `tasks.json` beside the settings file is used.
    #[serde(default)]
    pub source: Option<PathBuf>,
}

/// Host settings.
///
/// Serialized to/from TOML at `~/.config/mindstudy/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
}

impl Settings {
    fn default_path() -> Result<PathBuf, SettingsError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, or write and return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be
    /// parsed, or if the default settings cannot be written to disk.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from a specific file; a missing file becomes defaults
    /// persisted back to that path.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let mut settings: Settings =
                    toml::from_str(&content).map_err(|err| SettingsError::LoadFailed {
                        path: path.to_path_buf(),
                        message: err.to_string(),
                    })?;
                settings.clamp_session();
                Ok(settings)
            }
            Err(_) => {
                let settings = Self::default();
                settings.save_to(path)?;
                Ok(settings)
            }
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&Self::default_path()?)
    }

    /// Persist to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(self).map_err(|err| SettingsError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        std::fs::write(path, content).map_err(|err| SettingsError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Load from the default location, returning defaults on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Path of the planner task export: the configured override, or
    /// `tasks.json` in the settings directory.
    pub fn tasks_source(&self) -> Result<PathBuf, SettingsError> {
        match &self.tasks.source {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("tasks.json")),
        }
    }

    /// Get a settings value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let value = Self::get_json_value_by_path(&json, key)?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by key and persist the file.
    ///
    /// Minute values pass through the same clamping the engine applies,
    /// so an out-of-range `session.work_minutes` lands on the nearest
    /// bound rather than erroring.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed into the field's type, or the file cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|err| SettingsError::InvalidValue {
                key: key.to_string(),
                message: err.to_string(),
            })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|err| SettingsError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        self.clamp_session();
        self.save()
    }

    fn clamp_session(&mut self) {
        self.session = SessionConfig::new(self.session.work_minutes, self.session.break_minutes);
    }

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
    ) -> Result<(), SettingsError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(SettingsError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|err| {
                            SettingsError::InvalidValue {
                                key: key.to_string(),
                                message: err.to_string(),
                            }
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| {
                            SettingsError::InvalidValue {
                                key: key.to_string(),
                                message: format!("cannot parse '{value}' as number"),
                            }
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|err| {
                            SettingsError::InvalidValue {
                                key: key.to_string(),
                                message: err.to_string(),
                            }
                        })?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        }

        Err(SettingsError::UnknownKey(key.to_string()))
    }
}
