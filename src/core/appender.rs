//! Appender trait for log output destinations

use super::{error::Result, record::Record};
use std::fmt;
use std::sync::Arc;

/// A destination for log records
///
/// `id` is the key used by [`Logger::disable`](super::Logger::disable): two
/// distinct instances reporting the same id are treated as the same sink.
/// Appenders are shared between a logger and its copies, so `append` takes
/// `&self`; sinks that hold mutable state guard it themselves.
pub trait Appender: Send + Sync {
    fn append(&self, record: &Record<'_>) -> Result<()>;

    fn id(&self) -> &str;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// What to remove with [`Logger::disable`](super::Logger::disable)
#[derive(Clone)]
pub enum DisableTarget {
    ById(String),
    ByInstance(Arc<dyn Appender>),
}

impl DisableTarget {
    /// Whether `candidate` is the sink this target names
    ///
    /// An instance target matches the same allocation or any appender
    /// reporting the same id.
    pub fn matches(&self, candidate: &Arc<dyn Appender>) -> bool {
        match self {
            DisableTarget::ById(id) => candidate.id() == id,
            DisableTarget::ByInstance(appender) => {
                Arc::ptr_eq(appender, candidate) || appender.id() == candidate.id()
            }
        }
    }
}

impl fmt::Debug for DisableTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisableTarget::ById(id) => f.debug_tuple("ById").field(id).finish(),
            DisableTarget::ByInstance(appender) => {
                f.debug_tuple("ByInstance").field(&appender.id()).finish()
            }
        }
    }
}

impl From<&str> for DisableTarget {
    fn from(id: &str) -> Self {
        DisableTarget::ById(id.to_string())
    }
}

impl From<String> for DisableTarget {
    fn from(id: String) -> Self {
        DisableTarget::ById(id)
    }
}

impl From<Arc<dyn Appender>> for DisableTarget {
    fn from(appender: Arc<dyn Appender>) -> Self {
        DisableTarget::ByInstance(appender)
    }
}

impl From<&Arc<dyn Appender>> for DisableTarget {
    fn from(appender: &Arc<dyn Appender>) -> Self {
        DisableTarget::ByInstance(Arc::clone(appender))
    }
}
