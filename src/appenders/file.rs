//! File appender implementation

use crate::core::{Appender, LoggerError, Record, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Appends one text line per record to a file
///
/// ```text
/// [2025-01-08T10:30:45.123Z] [INFO ] [billing] Invoice sent 42 | env=prod
/// ```
///
/// Failing to open or write the file is reported as an error from
/// [`Appender::append`]; the logger decides whether that is escalated.
pub struct FileAppender {
    id: String,
    path: PathBuf,
    date_format: String,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileAppender {
    /// Open `path` for appending, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let appender = Self::lazy(path);
        let file = appender.open()?;
        *appender.writer.lock() = Some(BufWriter::new(file));
        Ok(appender)
    }

    /// Defer opening `path` until the first record arrives
    pub fn lazy(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: format!("file:{}", path.display()),
            path,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            writer: Mutex::new(None),
        }
    }

    /// Override the id used to disable this appender
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set a strftime-compatible format for the timestamp column
    #[must_use]
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", self.path.display()),
                    e,
                )
            })
    }

    fn format(&self, record: &Record<'_>) -> String {
        let mut line = format!(
            "[{}] [{:5}] [{}] {}",
            record.timestamp.format(&self.date_format),
            record.level.to_str(),
            record.logger_name(),
            sanitize(&record.message_with_data())
        );

        if !record.context.is_empty() {
            line.push_str(" | ");
            line.push_str(&record.context.format_fields());
        }

        line.push('\n');
        line
    }
}

impl Appender for FileAppender {
    fn append(&self, record: &Record<'_>) -> Result<()> {
        let line = self.format(record);
        let mut slot = self.writer.lock();

        if let Some(writer) = slot.as_mut() {
            writer.write_all(line.as_bytes())?;
        } else {
            let mut writer = BufWriter::new(self.open()?);
            writer.write_all(line.as_bytes())?;
            *slot = Some(writer);
        }
        Ok(())
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn flush(&self) -> Result<()> {
        if let Some(ref mut writer) = *self.writer.lock() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Escape line breaks and tabs so one record stays on one line
fn sanitize(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
