//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::{self, Write};

/// Standard stream a [`ConsoleAppender`] writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Writes lines to stdout or stderr.
///
/// Each line is written with a single `write_all` under the stream lock, so
/// lines from concurrent callers never interleave.
#[derive(Debug, Clone, Default)]
pub struct ConsoleAppender {
    target: ConsoleTarget,
}

impl ConsoleAppender {
    pub fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, line: &[u8]) -> Result<usize> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().lock().write_all(line)?,
            ConsoleTarget::Stderr => io::stderr().lock().write_all(line)?,
        }
        Ok(line.len())
    }

    fn flush(&self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().flush()?,
            ConsoleTarget::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
