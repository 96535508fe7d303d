//! # namedlog
//!
//! Named, leveled loggers that build contextual records and fan them out to
//! pluggable appenders.
//!
//! ## Features
//!
//! - **Level gating**: records below a logger's minimum level are never built
//! - **Shared context**: key-value fields attached to every record, shared
//!   between a logger and its copies
//! - **Ordered fan-out**: appenders receive each record in registration order,
//!   isolated from each other's failures
//! - **Aligned names**: console output pads and abbreviates logger names to a
//!   common width
//!
//! ```
//! use namedlog::prelude::*;
//!
//! let logger = Logger::builder("service/user-auth/handler")
//!     .min_level(Level::DEBUG)
//!     .context_field("env", "prod")
//!     .build();
//!
//! logger.info("listening");
//! namedlog::debug!(logger, "accepted {} connections", 3);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    #[cfg(feature = "file")]
    pub use crate::appenders::FileAppender;
    pub use crate::appenders::JsonAppender;
    pub use crate::core::{
        Appender, Context, DisableTarget, FieldValue, Level, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, NameNormalizer, Record, Result,
    };
}

#[cfg(feature = "console")]
pub use crate::appenders::ConsoleAppender;
#[cfg(feature = "file")]
pub use crate::appenders::FileAppender;
pub use crate::appenders::JsonAppender;
pub use crate::core::{
    Appender, Context, DisableTarget, FieldValue, Level, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, NameNormalizer, Record, Result, DEFAULT_CUR_NAME_LEN,
    DEFAULT_MAX_NAME_LEN,
};
