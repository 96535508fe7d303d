//! Console appender implementation

use crate::core::{Appender, Level, NameNormalizer, Record, Result};
use colored::{Color, Colorize};
use std::io::Write;
use std::sync::Arc;

const DEFAULT_DATE_FORMAT: &str = "%H:%M:%S";

/// Writes one aligned, colored line per record
///
/// ```text
///  ser/use/han 10:42:07 ●[INFO] ▶ listening on :8080
/// ```
///
/// Logger names go through a [`NameNormalizer`] so lines from different
/// loggers line up. PANIC and ERROR records go to stderr, the rest to stdout.
pub struct ConsoleAppender {
    use_colors: bool,
    date_format: String,
    normalizer: Arc<NameNormalizer>,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            normalizer: NameNormalizer::shared(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the strftime-compatible format used for the time column
    #[must_use]
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Align names with a dedicated normalizer instead of the process-wide one
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Arc<NameNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Format a record as a console line, without the trailing newline
    pub fn format(&self, record: &Record<'_>) -> String {
        let name = self.normalizer.normalize(record.logger_name());
        let time = record.timestamp.format(&self.date_format);
        let level = format!("{}[{}]", record.level.glyph, record.level.tag());

        if self.use_colors {
            format!(
                " {} {} {} ▶ {}",
                name.cyan(),
                time,
                level.color(level_color(&record.level)),
                record.message_with_data()
            )
        } else {
            format!(" {} {} {} ▶ {}", name, time, level, record.message_with_data())
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, record: &Record<'_>) -> Result<()> {
        let line = self.format(record);

        if record.level >= Level::ERROR {
            writeln!(std::io::stderr().lock(), "{}", line)?;
        } else {
            writeln!(std::io::stdout().lock(), "{}", line)?;
        }
        Ok(())
    }

    fn id(&self) -> &str {
        "console"
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

fn level_color(level: &Level) -> Color {
    Color::from(level.color)
}
