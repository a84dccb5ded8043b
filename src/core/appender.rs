//! Appender trait for log output destinations

use super::error::Result;

/// A destination for rendered log lines.
///
/// `append` receives exactly one complete line, trailing newline included,
/// and returns the number of bytes written. Appenders are shared between
/// threads, so implementations must not interleave the bytes of two lines.
pub trait Appender: Send + Sync {
    fn append(&self, line: &[u8]) -> Result<usize>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
