//! Level to destination mapping

use super::appender::Appender;
use super::log_level::LogLevel;
use std::fmt;
use std::sync::Arc;

/// Destination writers for each level.
///
/// The three slots may point at the same appender.
#[derive(Clone)]
pub struct Router {
    info: Arc<dyn Appender>,
    warn: Arc<dyn Appender>,
    error: Arc<dyn Appender>,
}

impl Router {
    pub fn new(info: Arc<dyn Appender>, warn: Arc<dyn Appender>, error: Arc<dyn Appender>) -> Self {
        Self { info, warn, error }
    }

    /// Route every level to the same appender
    pub fn single(appender: Arc<dyn Appender>) -> Self {
        Self::new(Arc::clone(&appender), Arc::clone(&appender), appender)
    }

    pub fn route(&self, level: LogLevel) -> &Arc<dyn Appender> {
        match level {
            LogLevel::Info => &self.info,
            LogLevel::Warn => &self.warn,
            LogLevel::Error => &self.error,
        }
    }

    /// Flush each distinct destination once
    pub fn flush(&self) -> super::error::Result<()> {
        self.info.flush()?;
        if !Arc::ptr_eq(&self.warn, &self.info) {
            self.warn.flush()?;
        }
        if !Arc::ptr_eq(&self.error, &self.info) && !Arc::ptr_eq(&self.error, &self.warn) {
            self.error.flush()?;
        }
        Ok(())
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("info", &self.info.name())
            .field("warn", &self.warn.name())
            .field("error", &self.error.name())
            .finish()
    }
}
