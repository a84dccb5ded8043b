//! Line rendering
//!
//! Layout: `[LEVEL] timestamp file line function message {fields}\n`. The
//! field section is left out when the entry has no fields.

use super::entry::Entry;
use super::error::{LoggerError, Result};
use super::field::encode_fields;
use super::logger::Logger;
use super::timestamp::FormatterConfig;
use std::io::Write;

/// Render `entry` into `buf`, returning how many field values used the
/// debug-dump fallback
pub fn render_line(buf: &mut Vec<u8>, entry: &Entry<'_>, format: &FormatterConfig) -> u64 {
    buf.push(b'[');
    buf.extend_from_slice(entry.level.to_str().as_bytes());
    buf.extend_from_slice(b"] ");

    format.timestamp_format.write_to(buf, &entry.timestamp);
    buf.push(b' ');

    let site = &entry.call_site;
    if format.include_file_line {
        buf.extend_from_slice(site.file.as_bytes());
        // Vec writes are infallible.
        let _ = write!(buf, " {} ", site.line);
    }
    if format.include_function {
        buf.extend_from_slice(site.function.as_bytes());
        buf.push(b' ');
    }

    buf.extend_from_slice(entry.message.as_bytes());

    let mut fallbacks = 0;
    if !entry.fields.is_empty() {
        buf.push(b' ');
        encode_fields(buf, &entry.fields);
        fallbacks = entry.fields.iter().filter(|f| f.value.is_fallback()).count() as u64;
    }
    buf.push(b'\n');
    fallbacks
}

/// Render `entry` with a pooled buffer and write it to the destination for
/// its level.
///
/// The buffer goes back to the pool when this returns, whether or not the
/// write succeeded.
pub(crate) fn write_entry(logger: &Logger, entry: &Entry<'_>) -> Result<usize> {
    let metrics = logger.metrics();
    let (mut buf, reused) = logger.pool().acquire();
    metrics.record_pool_use(reused);

    let fallbacks = render_line(&mut buf, entry, logger.formatter());
    metrics.record_encode_fallbacks(fallbacks);

    let appender = logger.router().route(entry.level);
    match appender.append(&buf) {
        Ok(written) => {
            metrics.record_logged();
            Ok(written)
        }
        Err(err) => {
            metrics.record_write_failure();
            Err(match err {
                LoggerError::IoError(source) => {
                    LoggerError::io_operation("writing log line", appender.name(), source)
                }
                other => other,
            })
        }
    }
}
