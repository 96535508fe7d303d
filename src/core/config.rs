//! Serializable logger configuration

use super::context::FieldValue;
use super::error::{LoggerError, Result};
use super::level::Level;
use serde::Deserialize;
use std::collections::HashMap;

/// Logger settings as they appear in a configuration file
///
/// Every field is optional; missing fields take the builder defaults.
///
/// ```
/// use namedlog::{Level, LoggerConfig};
///
/// let config = LoggerConfig::from_json(r#"{"name": "billing", "level": "warn"}"#).unwrap();
/// assert_eq!(config.level().unwrap(), Level::WARN);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: String,
    pub level: String,
    pub panic_on_error: bool,
    pub disabled: bool,
    pub context: HashMap<String, FieldValue>,
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn level(&self) -> Result<Level> {
        self.level
            .parse()
            .map_err(|_| LoggerError::config("LoggerConfig", format!("unknown level '{}'", self.level)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "logger name must not be empty"));
        }
        self.level().map(|_| ())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: "main".to_string(),
            level: Level::INFO.name.to_string(),
            panic_on_error: false,
            disabled: false,
            context: HashMap::new(),
        }
    }
}
