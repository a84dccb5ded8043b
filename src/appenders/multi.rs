//! Fan-out to several appenders

use crate::core::{Appender, Result};
use std::sync::Arc;

/// Writes every line to each of its appenders in order.
///
/// All appenders are attempted even when one fails; the first error is
/// returned afterwards. On success the reported length is that of the line.
pub struct MultiAppender {
    appenders: Vec<Arc<dyn Appender>>,
}

impl MultiAppender {
    pub fn new(appenders: Vec<Arc<dyn Appender>>) -> Self {
        Self { appenders }
    }

    #[must_use]
    pub fn with(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    pub fn len(&self) -> usize {
        self.appenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appenders.is_empty()
    }
}

impl Appender for MultiAppender {
    fn append(&self, line: &[u8]) -> Result<usize> {
        let mut first_err = None;
        for appender in &self.appenders {
            if let Err(e) = appender.append(line) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(line.len()),
        }
    }

    fn flush(&self) -> Result<()> {
        let mut first_err = None;
        for appender in &self.appenders {
            if let Err(e) = appender.flush() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn name(&self) -> &str {
        "multi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::LoggerError;

    struct Broken;

    impl Appender for Broken {
        fn append(&self, _line: &[u8]) -> Result<usize> {
            Err(LoggerError::writer("broken", "always fails"))
        }

        fn flush(&self) -> Result<()> {
            Err(LoggerError::writer("broken", "always fails"))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_fan_out() {
        let a = MemoryAppender::named("a");
        let b = MemoryAppender::named("b");
        let multi = MultiAppender::new(vec![Arc::new(a.clone())]).with(Arc::new(b.clone()));

        assert_eq!(multi.len(), 2);
        assert_eq!(multi.append(b"x\n").unwrap(), 2);
        assert_eq!(a.contents(), "x\n");
        assert_eq!(b.contents(), "x\n");
    }

    #[test]
    fn test_failure_does_not_stop_later_appenders() {
        let after = MemoryAppender::new();
        let multi = MultiAppender::new(vec![Arc::new(Broken), Arc::new(after.clone())]);

        let err = multi.append(b"line\n").unwrap_err();
        assert!(err.to_string().contains("always fails"));
        assert_eq!(after.contents(), "line\n");
        assert!(multi.flush().is_err());
    }

    #[test]
    fn test_empty_multi_accepts_lines() {
        let multi = MultiAppender::new(Vec::new());
        assert!(multi.is_empty());
        assert_eq!(multi.append(b"ignored\n").unwrap(), 8);
    }
}
