//! JSON appender for structured logging

use crate::core::{Appender, Record, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON file appender for structured logging
///
/// Writes each record as a single-line JSON object (JSONL format) with the
/// fields `time`, `message`, `level`, `data`, `ctx` and `pid`.
pub struct JsonAppender {
    id: String,
    writer: Mutex<BufWriter<File>>,
    pretty: bool,
}

impl JsonAppender {
    /// Create a new JSON appender
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let id = format!("json:{}", path.as_ref().display());
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            id,
            writer: Mutex::new(BufWriter::new(file)),
            pretty: false,
        })
    }

    /// Create a new JSON appender with pretty printing
    pub fn new_pretty<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut appender = Self::new(path)?;
        appender.pretty = true;
        Ok(appender)
    }
}

impl Appender for JsonAppender {
    fn append(&self, record: &Record<'_>) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(record)?
        } else {
            serde_json::to_string(record)?
        };

        writeln!(self.writer.lock(), "{}", json)?;
        Ok(())
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, Level, Logger};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_appender() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.jsonl");

        let appender = JsonAppender::new(&log_path)?;
        let logger = Logger::builder("auth")
            .context_field("user_id", 123)
            .build();
        let record = logger.build_record(
            Level::INFO,
            "User logged in".to_string(),
            vec![FieldValue::from("web")],
        );

        appender.append(&record)?;
        appender.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let parsed: serde_json::Value = serde_json::from_str(content.trim())?;
        assert_eq!(parsed["message"], "User logged in");
        assert_eq!(parsed["level"]["name"], "INFO");
        assert_eq!(parsed["level"]["value"], 20);
        assert_eq!(parsed["data"][0], "web");
        assert_eq!(parsed["ctx"]["user_id"], 123);
        assert_eq!(parsed["pid"], std::process::id());
        assert!(parsed.get("logger").is_none());

        Ok(())
    }

    #[test]
    fn test_pretty_json_appender() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("pretty.json");

        let appender = JsonAppender::new_pretty(&log_path)?;
        let logger = Logger::new("report");
        appender.append(&logger.build_record(Level::WARN, "slow query".to_string(), vec![]))?;
        appender.flush()?;

        let content = fs::read_to_string(&log_path)?;
        assert!(content.lines().count() > 1);

        let parsed: serde_json::Value = serde_json::from_str(&content)?;
        assert_eq!(parsed["message"], "slow query");
        assert_eq!(parsed["level"]["name"], "WARN");

        Ok(())
    }

    #[test]
    fn test_json_appender_multiple_entries() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test_multiple.jsonl");

        let appender = JsonAppender::new(&log_path)?;
        let logger = Logger::new("loop");

        for i in 0..5 {
            logger.add_context_key("iteration", i);
            let record = logger.build_record(Level::DEBUG, format!("Iteration {}", i), vec![]);
            appender.append(&record)?;
        }

        appender.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);

        for (i, line) in lines.into_iter().enumerate() {
            let parsed: serde_json::Value = serde_json::from_str(line)?;
            assert!(parsed["time"].is_string());
            assert_eq!(parsed["ctx"]["iteration"], i as i64);
        }

        Ok(())
    }
}
