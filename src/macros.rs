//! Logging macros for formatted messages.
//!
//! Each macro captures its arguments with `format_args!` and passes them to
//! the matching `*f` method on [`Logger`](crate::Logger), so nothing is
//! formatted when the level is suppressed.
//!
//! # Examples
//!
//! ```
//! use namedlog::prelude::*;
//! use namedlog::info;
//!
//! let logger = Logger::new("server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use namedlog::prelude::*;
/// # let logger = Logger::new("app");
/// use namedlog::log;
/// log!(logger, Level::INFO, "Simple message");
/// log!(logger, Level::ERROR, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($level, format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use namedlog::prelude::*;
/// # let mut logger = Logger::new("app");
/// # logger.set_level(Level::DEBUG);
/// use namedlog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use namedlog::prelude::*;
/// # let logger = Logger::new("app");
/// use namedlog::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
}

/// Log at PANIC and evaluate to `Err(LoggerError::Fatal)`.
///
/// # Examples
///
/// ```
/// # use namedlog::prelude::*;
/// # let logger = Logger::new("app");
/// use namedlog::fatal;
/// let err = fatal!(logger, "Unable to recover: {}", "disk full").unwrap_err();
/// assert!(err.is_fatal());
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(format_args!($($arg)+))
    };
}
