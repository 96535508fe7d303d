//! Log record structure

use super::context::{Context, FieldValue};
use super::level::Level;
use super::logger::Logger;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One materialized log event
///
/// A record lives only for the dispatch call that built it and borrows the
/// logger that produced it. The context is captured as a handle to the
/// logger's map, so appenders observe the map as it is when they read it.
///
/// Serialized field names are stable: `time`, `message`, `level`, `data`,
/// `ctx`, `pid`. The logger back-reference is never serialized.
#[derive(Debug, Serialize)]
pub struct Record<'a> {
    #[serde(rename = "time")]
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub level: Level,
    pub data: Vec<FieldValue>,
    #[serde(rename = "ctx")]
    pub context: Context,
    pub pid: u32,
    #[serde(skip)]
    pub logger: &'a Logger,
}

impl<'a> Record<'a> {
    pub fn new(logger: &'a Logger, level: Level, message: String, data: Vec<FieldValue>) -> Self {
        Self {
            timestamp: Utc::now(),
            message,
            level,
            data,
            context: logger.context().clone(),
            pid: logger.pid(),
            logger,
        }
    }

    /// Name of the originating logger
    pub fn logger_name(&self) -> &str {
        self.logger.name()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Message followed by data values, space separated
    pub fn message_with_data(&self) -> String {
        if self.data.is_empty() {
            return self.message.clone();
        }
        let data = self
            .data
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {}", self.message, data)
    }
}
