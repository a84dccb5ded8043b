//! In-memory appender for tests and demos

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects rendered lines in memory.
///
/// Clones share the same storage, so a test can hand one clone to a logger
/// and inspect the lines through another.
#[derive(Debug, Clone)]
pub struct MemoryAppender {
    name: String,
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Everything written so far
    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Written lines without their trailing newlines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for MemoryAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for MemoryAppender {
    fn append(&self, line: &[u8]) -> Result<usize> {
        self.buffer.lock().extend_from_slice(line);
        Ok(line.len())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
