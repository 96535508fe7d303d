//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Unknown level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// An appender fault escalated because the logger has `panic_on_error` set
    #[error("Appender '{appender}' failed: {message}")]
    AppenderFailed { appender: String, message: String },

    /// Raised by PANIC-level logging after the record has been dispatched
    #[error("fatal: {message}")]
    Fatal { message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn appender_failed(appender: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderFailed {
            appender: appender.into(),
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        LoggerError::Fatal {
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this is the termination signal produced by PANIC-level logging
    ///
    /// A top-level supervisor is expected to turn this into process exit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LoggerError::Fatal { .. })
    }
}
