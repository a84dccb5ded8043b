//! Adapter for arbitrary `io::Write` destinations

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::io::Write;

/// Appender over any `io::Write`, e.g. a socket or a pipe.
///
/// Writes are serialized by an internal lock and each line is written with a
/// single `write_all`.
pub struct WriterAppender<W: Write + Send> {
    name: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn append(&self, line: &[u8]) -> Result<usize> {
        self.writer.lock().write_all(line)?;
        Ok(line.len())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
