//! Logger configuration and entry creation
//!
//! A [`Logger`] is the explicit configuration object: destinations per
//! level, the context keys to extract, line layout options, the buffer pool
//! and metrics. It is cheap to clone and safe to share between threads.
//!
//! Code that cannot thread a `Logger` through can use the process-wide one
//! installed by [`init`] or [`init_with`]. Only the first installation takes
//! effect.

use super::{
    appender::Appender,
    buffer_pool::{BufferPool, DEFAULT_POOL_CAPACITY},
    call_site::CallSite,
    entry::Entry,
    error::{LoggerError, Result},
    log_context::{extract_fields, ContextSource},
    metrics::LoggerMetrics,
    router::Router,
    timestamp::{FormatterConfig, TimestampFormat},
};
use crate::appenders::ConsoleAppender;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Callback invoked with each write failure swallowed by a terminal call
pub type WriteErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

static GLOBAL: OnceLock<Logger> = OnceLock::new();
static FALLBACK: OnceLock<Logger> = OnceLock::new();

#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    router: Router,
    ctx_keys: Vec<String>,
    formatter: FormatterConfig,
    pool: BufferPool,
    metrics: LoggerMetrics,
    on_write_error: Option<WriteErrorCallback>,
}

impl Logger {
    /// Logger writing every level to stdout
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use ctx_logger::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder()
    ///     .info_writer(Arc::new(ConsoleAppender::stdout()))
    ///     .warn_writer(Arc::new(ConsoleAppender::stderr()))
    ///     .error_writer(Arc::new(ConsoleAppender::stderr()))
    ///     .ctx_keys(["tid"])
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Start an entry located at the caller.
    ///
    /// Only file and line are resolved; use `entry!` to record the function
    /// name as well.
    #[track_caller]
    pub fn entry(&self) -> Entry<'_> {
        self.entry_at(CallSite::caller())
    }

    /// Start an entry located at the caller, with the configured context
    /// keys extracted from `ctx`
    #[track_caller]
    pub fn ctx<C>(&self, ctx: &C) -> Entry<'_>
    where
        C: ContextSource + ?Sized,
    {
        self.ctx_at(CallSite::caller(), ctx)
    }

    pub fn entry_at(&self, call_site: CallSite) -> Entry<'_> {
        Entry::new(self, call_site)
    }

    pub fn ctx_at<C>(&self, call_site: CallSite, ctx: &C) -> Entry<'_>
    where
        C: ContextSource + ?Sized,
    {
        let fields = extract_fields(ctx, &self.inner.ctx_keys);
        Entry::with_fields_from(self, call_site, fields)
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.entry().info(message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.entry().warn(message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.entry().error(message);
    }

    pub fn ctx_keys(&self) -> &[String] {
        &self.inner.ctx_keys
    }

    pub fn router(&self) -> &Router {
        &self.inner.router
    }

    pub fn formatter(&self) -> &FormatterConfig {
        &self.inner.formatter
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use ctx_logger::Logger;
    ///
    /// let logger = Logger::new();
    /// let metrics = logger.metrics();
    /// println!("Written: {}", metrics.total_logged());
    /// println!("Failed: {}", metrics.write_failures());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    pub(crate) fn pool(&self) -> &BufferPool {
        &self.inner.pool
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.router.flush()
    }

    pub(crate) fn report_write_error(&self, err: &LoggerError) {
        if let Some(ref callback) = self.inner.on_write_error {
            callback(err);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("router", &self.inner.router)
            .field("ctx_keys", &self.inner.ctx_keys)
            .field("formatter", &self.inner.formatter)
            .finish_non_exhaustive()
    }
}

/// Install the process-wide logger from three destinations and the context
/// keys to extract.
///
/// Returns `false` and changes nothing if a logger was already installed.
///
/// # Example
///
/// ```
/// use ctx_logger::prelude::*;
/// use std::sync::Arc;
///
/// let out: Arc<dyn Appender> = Arc::new(ConsoleAppender::stdout());
/// ctx_logger::init(out.clone(), out.clone(), out, ["tid"]);
///
/// let ctx = LogContext::new().with_value("tid", 123456);
/// ctx_logger::ctx!(&ctx).with_field("name", "jack").info("hello");
/// ```
pub fn init<I, S>(
    info: Arc<dyn Appender>,
    warn: Arc<dyn Appender>,
    error: Arc<dyn Appender>,
    ctx_keys: I,
) -> bool
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    init_with(
        Logger::builder()
            .writers(info, warn, error)
            .ctx_keys(ctx_keys)
            .build(),
    )
}

/// Install `logger` as the process-wide logger, first call wins
pub fn init_with(logger: Logger) -> bool {
    GLOBAL.set(logger).is_ok()
}

/// The installed process-wide logger, or a stdout logger if none was
/// installed yet
pub fn global() -> &'static Logger {
    match GLOBAL.get() {
        Some(logger) => logger,
        None => FALLBACK.get_or_init(Logger::new),
    }
}

/// Start an entry on the process-wide logger with context fields from `ctx`.
///
/// The function name is left empty; the `ctx!` macro captures it too.
#[track_caller]
pub fn ctx<C>(ctx: &C) -> Entry<'static>
where
    C: ContextSource + ?Sized,
{
    global().ctx(ctx)
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder {
    info: Option<Arc<dyn Appender>>,
    warn: Option<Arc<dyn Appender>>,
    error: Option<Arc<dyn Appender>>,
    ctx_keys: Vec<String>,
    formatter: FormatterConfig,
    pool_capacity: usize,
    on_write_error: Option<WriteErrorCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            info: None,
            warn: None,
            error: None,
            ctx_keys: Vec::new(),
            formatter: FormatterConfig::default(),
            pool_capacity: DEFAULT_POOL_CAPACITY,
            on_write_error: None,
        }
    }

    /// Send every level to `appender`
    #[must_use = "builder methods return a new value"]
    pub fn writer<A: Appender + 'static>(mut self, appender: A) -> Self {
        let appender: Arc<dyn Appender> = Arc::new(appender);
        self.info = Some(Arc::clone(&appender));
        self.warn = Some(Arc::clone(&appender));
        self.error = Some(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn writers(
        self,
        info: Arc<dyn Appender>,
        warn: Arc<dyn Appender>,
        error: Arc<dyn Appender>,
    ) -> Self {
        self.info_writer(info).warn_writer(warn).error_writer(error)
    }

    #[must_use = "builder methods return a new value"]
    pub fn info_writer(mut self, appender: Arc<dyn Appender>) -> Self {
        self.info = Some(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn warn_writer(mut self, appender: Arc<dyn Appender>) -> Self {
        self.warn = Some(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn error_writer(mut self, appender: Arc<dyn Appender>) -> Self {
        self.error = Some(appender);
        self
    }

    /// Context keys extracted by `Logger::ctx`, in output order
    #[must_use = "builder methods return a new value"]
    pub fn ctx_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ctx_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn hide_file_line(mut self, hide: bool) -> Self {
        self.formatter.include_file_line = !hide;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn hide_function(mut self, hide: bool) -> Self {
        self.formatter.include_function = !hide;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    /// Maximum number of idle render buffers kept for reuse
    #[must_use = "builder methods return a new value"]
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Set a callback for write failures
    ///
    /// # Example
    ///
    /// ```
    /// use ctx_logger::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder()
    ///     .on_write_error(Arc::new(|err| {
    ///         eprintln!("log write failed: {}", err);
    ///     }))
    ///     .build();
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn on_write_error(mut self, callback: WriteErrorCallback) -> Self {
        self.on_write_error = Some(callback);
        self
    }

    /// Build the Logger, rejecting an empty context key, a zero pool
    /// capacity or a timestamp pattern chrono cannot render
    pub fn try_build(self) -> Result<Logger> {
        if self.pool_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerBuilder",
                "pool capacity must be at least 1",
            ));
        }
        if self.ctx_keys.iter().any(String::is_empty) {
            return Err(LoggerError::config("LoggerBuilder", "context keys must not be empty"));
        }
        if !self.formatter.timestamp_format.is_valid() {
            return Err(LoggerError::config(
                "LoggerBuilder",
                format!("invalid timestamp format {:?}", self.formatter.timestamp_format),
            ));
        }
        Ok(self.build())
    }

    /// Build the Logger; unset destinations default to stdout
    pub fn build(self) -> Logger {
        let stdout: Arc<dyn Appender> = Arc::new(ConsoleAppender::stdout());
        let router = Router::new(
            self.info.unwrap_or_else(|| Arc::clone(&stdout)),
            self.warn.unwrap_or_else(|| Arc::clone(&stdout)),
            self.error.unwrap_or(stdout),
        );

        Logger {
            inner: Arc::new(LoggerInner {
                router,
                ctx_keys: self.ctx_keys,
                formatter: self.formatter,
                pool: BufferPool::with_capacity(self.pool_capacity),
                metrics: LoggerMetrics::new(),
                on_write_error: self.on_write_error,
            }),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
