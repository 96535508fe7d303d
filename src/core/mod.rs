//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod context;
pub mod error;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod name;
pub mod record;

pub use appender::{Appender, DisableTarget};
pub use config::LoggerConfig;
pub use context::{Context, FieldValue};
pub use error::{LoggerError, Result};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use name::{NameNormalizer, DEFAULT_CUR_NAME_LEN, DEFAULT_MAX_NAME_LEN};
pub use record::Record;
