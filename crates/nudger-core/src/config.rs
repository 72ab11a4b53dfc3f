//! Reminder configuration.
//!
//! Holds the validated settings and message pools the scheduler runs on.
//! Loading goes through three phases so every failure lands in the right
//! [`ConfigError`] kind:
//!
//! 1. text -> generic value (syntax problems are `Malformed`)
//! 2. generic value -> raw document (missing or mistyped keys are `Incomplete`)
//! 3. raw document -> [`ReminderConfig`] (domain violations are `Incomplete`)
//!
//! JSON is the default format; a `.toml` extension selects TOML.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Timing settings. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settings {
    initial_delay_minutes: u32,
    min_interval_minutes: u32,
    max_interval_minutes: u32,
    working_timeout_seconds: u32,
}

impl Settings {
    /// Build validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Incomplete`] if an interval is zero or if
    /// `min_interval_minutes` exceeds `max_interval_minutes`.
    pub fn new(
        initial_delay_minutes: u32,
        min_interval_minutes: u32,
        max_interval_minutes: u32,
        working_timeout_seconds: u32,
    ) -> Result<Self, ConfigError> {
        if min_interval_minutes == 0 {
            return Err(ConfigError::incomplete(
                "settings.min_interval_minutes",
                "must be a positive number of minutes",
            ));
        }
        if max_interval_minutes == 0 {
            return Err(ConfigError::incomplete(
                "settings.max_interval_minutes",
                "must be a positive number of minutes",
            ));
        }
        if min_interval_minutes > max_interval_minutes {
            return Err(ConfigError::incomplete(
                "settings.min_interval_minutes",
                format!(
                    "min_interval_minutes ({min_interval_minutes}) must not exceed max_interval_minutes ({max_interval_minutes})"
                ),
            ));
        }
        Ok(Self {
            initial_delay_minutes,
            min_interval_minutes,
            max_interval_minutes,
            working_timeout_seconds,
        })
    }

    pub fn initial_delay_minutes(&self) -> u32 {
        self.initial_delay_minutes
    }

    pub fn min_interval_minutes(&self) -> u32 {
        self.min_interval_minutes
    }

    pub fn max_interval_minutes(&self) -> u32 {
        self.max_interval_minutes
    }

    pub fn working_timeout_seconds(&self) -> u32 {
        self.working_timeout_seconds
    }

    /// Inclusive interval bounds in minutes.
    pub fn interval_bounds(&self) -> (u32, u32) {
        (self.min_interval_minutes, self.max_interval_minutes)
    }

    pub fn initial_delay(&self) -> Duration {
        minutes(self.initial_delay_minutes)
    }

    /// How long the success message stays up before it dismisses itself.
    pub fn working_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.working_timeout_seconds))
    }
}

/// Message pools. Both pools are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePools {
    questions: Vec<String>,
    motivational_messages: Vec<String>,
    success_message: String,
}

impl MessagePools {
    /// Build validated pools.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Incomplete`] if either pool is empty. Any
    /// success message, including an empty one, is accepted.
    pub fn new(
        questions: Vec<String>,
        motivational_messages: Vec<String>,
        success_message: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let success_message = success_message.into();
        if questions.is_empty() {
            return Err(ConfigError::incomplete("questions", "must contain at least one question"));
        }
        if motivational_messages.is_empty() {
            return Err(ConfigError::incomplete(
                "motivational_messages",
                "must contain at least one message",
            ));
        }
        Ok(Self {
            questions,
            motivational_messages,
            success_message,
        })
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn motivational_messages(&self) -> &[String] {
        &self.motivational_messages
    }

    pub fn success_message(&self) -> &str {
        &self.success_message
    }
}

/// Validated settings + message pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderConfig {
    settings: Settings,
    pools: MessagePools,
}

/// Overview of a loaded configuration, printed by `nudger check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub questions: usize,
    pub motivational_messages: usize,
    pub initial_delay_minutes: u32,
    pub min_interval_minutes: u32,
    pub max_interval_minutes: u32,
    pub working_timeout_seconds: u32,
}

/// On-disk format of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension. Anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

// Raw document shape. Fields stay untyped so that both a missing key and a
// mistyped one are reported under the key's own name.
#[derive(Debug, Deserialize)]
struct RawConfig {
    questions: Option<Value>,
    motivational_messages: Option<Value>,
    success_message: Option<Value>,
    settings: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    initial_delay_minutes: Option<Value>,
    min_interval_minutes: Option<Value>,
    max_interval_minutes: Option<Value>,
    working_timeout_seconds: Option<Value>,
}

impl ReminderConfig {
    pub fn new(settings: Settings, pools: MessagePools) -> Self {
        Self { settings, pools }
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFound`] if `path` does not exist
    /// - [`ConfigError::Malformed`] if it cannot be read or parsed
    /// - [`ConfigError::Incomplete`] if a required key is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(ConfigError::Malformed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        };
        Self::parse(&content, ConfigFormat::from_path(path), path)
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// See [`ReminderConfig::load`]; `NotFound` is never returned.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, ConfigFormat::Json, Path::new("<json>"))
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// See [`ReminderConfig::load`]; `NotFound` is never returned.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, ConfigFormat::Toml, Path::new("<toml>"))
    }

    fn parse(text: &str, format: ConfigFormat, origin: &Path) -> Result<Self, ConfigError> {
        let malformed = |message: String| ConfigError::Malformed {
            path: PathBuf::from(origin),
            message,
        };
        let raw: RawConfig = match format {
            ConfigFormat::Json => {
                let value: Value =
                    serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;
                serde_json::from_value(value).map_err(|_| not_a_table())?
            }
            ConfigFormat::Toml => {
                let table: toml::Table =
                    toml::from_str(text).map_err(|e| malformed(e.to_string()))?;
                toml::Value::Table(table)
                    .try_into()
                    .map_err(|_: toml::de::Error| not_a_table())?
            }
        };
        raw.validate()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pools(&self) -> &MessagePools {
        &self.pools
    }

    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            questions: self.pools.questions.len(),
            motivational_messages: self.pools.motivational_messages.len(),
            initial_delay_minutes: self.settings.initial_delay_minutes,
            min_interval_minutes: self.settings.min_interval_minutes,
            max_interval_minutes: self.settings.max_interval_minutes,
            working_timeout_seconds: self.settings.working_timeout_seconds,
        }
    }
}

impl RawConfig {
    fn validate(self) -> Result<ReminderConfig, ConfigError> {
        let questions = string_list("questions", self.questions)?;
        let motivational = string_list("motivational_messages", self.motivational_messages)?;
        let success = match self.success_message {
            Some(Value::String(message)) => message,
            Some(_) => return Err(ConfigError::incomplete("success_message", "must be a string")),
            None => return Err(missing("success_message")),
        };
        let raw: RawSettings = match self.settings {
            Some(value @ Value::Object(_)) => serde_json::from_value(value)
                .map_err(|e| ConfigError::incomplete("settings", e.to_string()))?,
            Some(_) => return Err(ConfigError::incomplete("settings", "must be a table")),
            None => return Err(missing("settings")),
        };

        let settings = Settings::new(
            non_negative("settings.initial_delay_minutes", raw.initial_delay_minutes)?,
            non_negative("settings.min_interval_minutes", raw.min_interval_minutes)?,
            non_negative("settings.max_interval_minutes", raw.max_interval_minutes)?,
            non_negative("settings.working_timeout_seconds", raw.working_timeout_seconds)?,
        )?;
        let pools = MessagePools::new(questions, motivational, success)?;
        Ok(ReminderConfig::new(settings, pools))
    }
}

fn missing(key: &str) -> ConfigError {
    ConfigError::incomplete(key, "required key is missing")
}

fn not_a_table() -> ConfigError {
    ConfigError::incomplete("config", "top level must be a table of keys")
}

fn string_list(key: &str, value: Option<Value>) -> Result<Vec<String>, ConfigError> {
    let invalid = || ConfigError::incomplete(key, "must be a list of strings");
    match value.ok_or_else(|| missing(key))? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => Ok(text),
                _ => Err(invalid()),
            })
            .collect(),
        _ => Err(invalid()),
    }
}

fn non_negative(key: &str, value: Option<Value>) -> Result<u32, ConfigError> {
    let value = value
        .ok_or_else(|| missing(key))?
        .as_i64()
        .ok_or_else(|| ConfigError::incomplete(key, "must be a whole number"))?;
    if value < 0 {
        return Err(ConfigError::incomplete(key, format!("must be non-negative, got {value}")));
    }
    u32::try_from(value)
        .map_err(|_| ConfigError::incomplete(key, format!("value {value} is too large")))
}

/// Convert whole minutes to a [`Duration`].
pub fn minutes(m: u32) -> Duration {
    Duration::from_secs(u64::from(m).saturating_mul(60))
}
