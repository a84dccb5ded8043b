//! Core logger types and traits

pub mod appender;
pub mod buffer_pool;
pub mod call_site;
pub mod entry;
pub mod error;
pub mod field;
pub mod log_context;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod renderer;
pub mod router;
pub mod timestamp;

pub use appender::Appender;
pub use buffer_pool::{BufferPool, PooledBuffer};
pub use call_site::CallSite;
pub use entry::Entry;
pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue, MISSING_VALUE};
pub use log_context::{extract_fields, ContextSource, LogContext};
pub use log_level::LogLevel;
pub use logger::{ctx, global, init, init_with, Logger, LoggerBuilder, WriteErrorCallback};
pub use metrics::LoggerMetrics;
pub use renderer::render_line;
pub use router::Router;
pub use timestamp::{FormatterConfig, TimestampFormat};
