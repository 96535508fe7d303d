//! Main logger implementation
//!
//! A [`Logger`] gates each call on its minimum level, builds a [`Record`] and
//! hands it to every enabled appender in registration order, on the calling
//! thread.
//!
//! # Sharing
//!
//! [`Logger::copy`] (and `Clone`) produce a logger that shares the context
//! map, the appender list and the metrics of its source. Adding a context key
//! or enabling an appender on either one is visible on both. Replacing the
//! context with [`Logger::set_context`] or the appender list with
//! [`Logger::set_appenders`] detaches only the logger it is called on.
//!
//! The shared containers sit behind `parking_lot` locks, so concurrent calls
//! are memory safe. Ordering between a `disable` on one thread and a dispatch
//! on another is not defined: a record may or may not reach an appender that
//! is being removed while it is dispatched.

use super::{
    appender::{Appender, DisableTarget},
    config::LoggerConfig,
    context::{Context, FieldValue},
    error::{LoggerError, Result},
    level::Level,
    metrics::LoggerMetrics,
    record::Record,
};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

type SharedAppenders = Arc<RwLock<Vec<Arc<dyn Appender>>>>;

#[derive(Clone)]
pub struct Logger {
    name: String,
    min_level: Level,
    context: Context,
    appenders: SharedAppenders,
    disabled: bool,
    panic_on_error: bool,
    pid: u32,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger at INFO with no appenders and an empty context
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: Level::INFO,
            context: Context::new(),
            appenders: Arc::new(RwLock::new(Vec::new())),
            disabled: false,
            panic_on_error: false,
            pid: std::process::id(),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Build a logger from configuration, without appenders
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.validate()?;
        let logger = Logger::builder(config.name.clone())
            .min_level(config.level()?)
            .context(config.context.clone())
            .panic_on_error(config.panic_on_error)
            .disabled(config.disabled)
            .build();
        Ok(logger)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.min_level
    }

    pub fn set_level(&mut self, level: Level) {
        self.min_level = level;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn panic_on_error(&self) -> bool {
        self.panic_on_error
    }

    /// When set, an appender failure panics once every appender has been tried
    pub fn set_panic_on_error(&mut self, panic_on_error: bool) {
        self.panic_on_error = panic_on_error;
    }

    /// OS process id captured when the logger was created
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Whether a record at `level` would be built and dispatched
    #[inline]
    pub fn should_emit(&self, level: &Level) -> bool {
        !self.disabled && level.value >= self.min_level.value
    }

    /// Build a record owned by the caller
    ///
    /// No gate check happens here; callers that build records directly decide
    /// themselves whether to emit them.
    pub fn build_record(&self, level: Level, message: String, data: Vec<FieldValue>) -> Record<'_> {
        Record::new(self, level, message, data)
    }

    /// Hand `record` to every appender in registration order
    ///
    /// Each appender is isolated: an error or a panic in one of them is
    /// reported on stderr and the remaining appenders still receive the
    /// record. The first failure is returned after all appenders ran.
    pub fn emit(&self, record: &Record<'_>) -> Result<()> {
        // Snapshot so appenders may enable/disable on this logger without deadlocking
        let appenders: Vec<Arc<dyn Appender>> = self.appenders.read().clone();
        let mut first_failure: Option<LoggerError> = None;

        for appender in &appenders {
            if let Err(err) = isolated(appender, "append", |a| a.append(record)) {
                first_failure = first_failure.or(Some(err));
            }
        }

        self.metrics.record_emitted();
        match first_failure {
            Some(err) => {
                self.metrics.record_failed();
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Gate, build and dispatch
    fn dispatch(&self, level: Level, message: impl fmt::Display, data: Vec<FieldValue>) {
        if !self.should_emit(&level) {
            self.metrics.record_suppressed();
            return;
        }

        let record = self.build_record(level, message.to_string(), data);
        if let Err(err) = self.emit(&record) {
            if self.panic_on_error {
                panic!("{}", err);
            }
        }
    }

    /// Log `message` with attached `data` at an arbitrary level
    ///
    /// # Panics
    ///
    /// Panics after the dispatch if an appender failed and `panic_on_error` is set.
    pub fn log(&self, level: Level, message: impl fmt::Display, data: Vec<FieldValue>) {
        self.dispatch(level, message, data);
    }

    /// Log pre-captured format arguments; nothing is formatted for suppressed levels
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.dispatch(level, args, Vec::new());
    }

    #[inline]
    pub fn debug(&self, message: impl fmt::Display) {
        self.dispatch(Level::DEBUG, message, Vec::new());
    }

    #[inline]
    pub fn info(&self, message: impl fmt::Display) {
        self.dispatch(Level::INFO, message, Vec::new());
    }

    #[inline]
    pub fn warn(&self, message: impl fmt::Display) {
        self.dispatch(Level::WARN, message, Vec::new());
    }

    #[inline]
    pub fn error(&self, message: impl fmt::Display) {
        self.dispatch(Level::ERROR, message, Vec::new());
    }

    pub fn debug_with(&self, message: impl fmt::Display, data: Vec<FieldValue>) {
        self.dispatch(Level::DEBUG, message, data);
    }

    pub fn info_with(&self, message: impl fmt::Display, data: Vec<FieldValue>) {
        self.dispatch(Level::INFO, message, data);
    }

    pub fn warn_with(&self, message: impl fmt::Display, data: Vec<FieldValue>) {
        self.dispatch(Level::WARN, message, data);
    }

    pub fn error_with(&self, message: impl fmt::Display, data: Vec<FieldValue>) {
        self.dispatch(Level::ERROR, message, data);
    }

    #[inline]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::DEBUG, args);
    }

    #[inline]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::INFO, args);
    }

    #[inline]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::WARN, args);
    }

    #[inline]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::ERROR, args);
    }

    /// Log at PANIC, flush every appender, then return [`LoggerError::Fatal`]
    /// carrying the message
    ///
    /// The error is returned even when the record itself was suppressed by
    /// the gate. Propagate it to the top of the program and exit there.
    ///
    /// ```
    /// use namedlog::Logger;
    ///
    /// fn connect(logger: &Logger) -> namedlog::Result<()> {
    ///     logger.panic("database unreachable")?;
    ///     unreachable!()
    /// }
    ///
    /// let err = connect(&Logger::new("db")).unwrap_err();
    /// assert!(err.is_fatal());
    /// ```
    pub fn panic(&self, message: impl fmt::Display) -> Result<()> {
        self.panic_with(message, Vec::new())
    }

    pub fn panic_with(&self, message: impl fmt::Display, data: Vec<FieldValue>) -> Result<()> {
        let message = message.to_string();
        if self.should_emit(&Level::PANIC) {
            self.dispatch(Level::PANIC, &message, data);
            // The caller is about to exit, so buffered sinks must hit disk now.
            // Failures were already reported on stderr.
            let _ = self.flush();
        } else {
            self.metrics.record_suppressed();
        }
        Err(LoggerError::fatal(message))
    }

    /// Formatted PANIC; the message is always rendered since the error carries it
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.panic_with(args, Vec::new())
    }

    /// Register an appender at the end of the list
    ///
    /// The same appender (or id) may be registered more than once; it then
    /// receives each record once per registration.
    pub fn enable(&self, appender: Arc<dyn Appender>) -> &Self {
        self.appenders.write().push(appender);
        self
    }

    /// Remove the first registered appender matching `target`
    ///
    /// Returns whether an appender was removed. A miss leaves the list as it
    /// was.
    pub fn disable(&self, target: impl Into<DisableTarget>) -> bool {
        let target = target.into();
        let mut appenders = self.appenders.write();
        match appenders.iter().position(|candidate| target.matches(candidate)) {
            Some(idx) => {
                appenders.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Replace the appender list of this logger only
    pub fn set_appenders(&mut self, appenders: Vec<Arc<dyn Appender>>) {
        self.appenders = Arc::new(RwLock::new(appenders));
    }

    pub fn appender_ids(&self) -> Vec<String> {
        self.appenders
            .read()
            .iter()
            .map(|appender| appender.id().to_string())
            .collect()
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Replace the context of this logger only
    pub fn set_context(&mut self, context: impl Into<Context>) -> &mut Self {
        self.context = context.into();
        self
    }

    /// Insert into the context map, which copies of this logger share
    pub fn add_context_key<K, V>(&self, key: K, value: V) -> &Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.set(key, value);
        self
    }

    /// Shallow copy sharing context, appenders and metrics with `self`
    #[must_use]
    pub fn copy(&self) -> Logger {
        self.clone()
    }

    /// Copy under a different name, e.g. for a sub-component
    #[must_use]
    pub fn named(&self, name: impl Into<String>) -> Logger {
        let mut child = self.clone();
        child.name = name.into();
        child
    }

    /// Flush every appender, each one isolated like in [`Logger::emit`]
    ///
    /// Returns the first failure once all appenders were flushed.
    pub fn flush(&self) -> Result<()> {
        let appenders: Vec<Arc<dyn Appender>> = self.appenders.read().clone();
        let mut first_failure: Option<LoggerError> = None;

        for appender in &appenders {
            if let Err(err) = isolated(appender, "flush", |a| a.flush()) {
                first_failure = first_failure.or(Some(err));
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new("main")
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("min_level", &self.min_level.name)
            .field("appenders", &self.appender_ids())
            .field("context", &self.context)
            .field("disabled", &self.disabled)
            .field("panic_on_error", &self.panic_on_error)
            .field("pid", &self.pid)
            .finish()
    }
}

/// Run `op` on one appender, turning an error or a panic into `AppenderFailed`
/// after reporting it on stderr
fn isolated<F>(appender: &Arc<dyn Appender>, action: &str, op: F) -> Result<()>
where
    F: FnOnce(&dyn Appender) -> Result<()>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| op(appender.as_ref())));

    let message = match outcome {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(e)) => {
            eprintln!("[LOGGER ERROR] Appender '{}' {} failed: {}", appender.id(), action, e);
            e.to_string()
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            eprintln!(
                "[LOGGER CRITICAL] Appender '{}' panicked during {}: {}. \
                 Other appenders continue to function.",
                appender.id(),
                action,
                message
            );
            message
        }
    };

    Err(LoggerError::appender_failed(appender.id(), message))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use namedlog::prelude::*;
///
/// let logger = Logger::builder("api/handlers")
///     .min_level(Level::DEBUG)
///     .context_field("env", "prod")
///     .panic_on_error(false)
///     .build();
///
/// assert_eq!(logger.level(), Level::DEBUG);
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: Level,
    appenders: Vec<Arc<dyn Appender>>,
    context: HashMap<String, FieldValue>,
    panic_on_error: bool,
    disabled: bool,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: Level::INFO,
            appenders: Vec::new(),
            context: HashMap::new(),
            panic_on_error: false,
            disabled: false,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Arc::new(appender));
        self
    }

    /// Add an appender that is also held elsewhere, e.g. to disable it by instance later
    #[must_use = "builder methods return a new value"]
    pub fn shared_appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, fields: HashMap<String, FieldValue>) -> Self {
        self.context.extend(fields);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn context_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn panic_on_error(mut self, panic_on_error: bool) -> Self {
        self.panic_on_error = panic_on_error;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn build(self) -> Logger {
        let mut logger = Logger::new(self.name);
        logger.set_level(self.min_level);
        logger.set_panic_on_error(self.panic_on_error);
        logger.set_disabled(self.disabled);
        logger.set_context(self.context);
        logger.set_appenders(self.appenders);
        logger
    }
}

impl Logger {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}
