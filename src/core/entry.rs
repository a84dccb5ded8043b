//! Log entry builder
//!
//! An [`Entry`] is created with its call site, timestamp and any context
//! fields already captured. Fields are appended with the `with_*` methods and
//! the entry is consumed by exactly one terminal call (`info`, `warnf`,
//! `error_args`, `log`, ...), which renders and writes a single line.

use super::call_site::CallSite;
use super::error::Result;
use super::field::{Field, FieldValue, MISSING_VALUE};
use super::log_level::LogLevel;
use super::logger::Logger;
use super::renderer;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::{self, Display, Write};

/// One in-flight log event
///
/// # Example
///
/// ```
/// use ctx_logger::prelude::*;
///
/// let memory = MemoryAppender::new();
/// let logger = Logger::builder().writer(memory.clone()).build();
///
/// logger.entry()
///     .with_field("name", "jack")
///     .with_field("age", 18)
///     .info("hello");
///
/// assert!(memory.contents().ends_with("hello {\"name\":\"jack\",\"age\":18}\n"));
/// ```
#[must_use = "an entry does nothing until a terminal method such as `info` is called"]
pub struct Entry<'a> {
    logger: &'a Logger,
    pub(crate) level: LogLevel,
    pub(crate) timestamp: DateTime<Local>,
    pub(crate) call_site: CallSite,
    pub(crate) message: String,
    pub(crate) fields: Vec<Field>,
}

impl<'a> Entry<'a> {
    /// Create an entry stamped with the current local time
    pub fn new(logger: &'a Logger, call_site: CallSite) -> Self {
        Self::with_fields_from(logger, call_site, Vec::new())
    }

    pub(crate) fn with_fields_from(
        logger: &'a Logger,
        call_site: CallSite,
        fields: Vec<Field>,
    ) -> Self {
        Self {
            logger,
            level: LogLevel::Info,
            timestamp: Local::now(),
            call_site,
            message: String::new(),
            fields,
        }
    }

    /// Override the creation timestamp
    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Append one field
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.push(Field::new(key, value));
        self
    }

    /// Append at least two fields plus a flattened `key, value, ...` list.
    ///
    /// Keys in `rest` use their plain string form. When `rest` has an odd
    /// length the last key gets [`MISSING_VALUE`].
    ///
    /// ```
    /// use ctx_logger::prelude::*;
    ///
    /// let memory = MemoryAppender::new();
    /// let logger = Logger::builder().writer(memory.clone()).build();
    ///
    /// logger.entry()
    ///     .with_fields("name", "jack", "age", 18, [FieldValue::from("city")])
    ///     .info("odd");
    ///
    /// assert!(memory.contents().contains(r#""city":"??? key or value missing""#));
    /// ```
    pub fn with_fields<K1, V1, K2, V2, I>(mut self, k1: K1, v1: V1, k2: K2, v2: V2, rest: I) -> Self
    where
        K1: Into<String>,
        V1: Into<FieldValue>,
        K2: Into<String>,
        V2: Into<FieldValue>,
        I: IntoIterator<Item = FieldValue>,
    {
        self.fields.push(Field::new(k1, v1));
        self.fields.push(Field::new(k2, v2));

        let mut rest = rest.into_iter();
        while let Some(key) = rest.next() {
            let value = rest
                .next()
                .unwrap_or_else(|| FieldValue::Text(MISSING_VALUE.to_string()));
            self.fields.push(Field {
                key: key.to_string(),
                value,
            });
        }
        self
    }

    /// Append a field rendered through `Display`, always quoted
    pub fn with_display<K, T>(self, key: K, value: &T) -> Self
    where
        K: Into<String>,
        T: Display + ?Sized,
    {
        self.with_field(key, FieldValue::display(value))
    }

    /// Append a field serialized as JSON, falling back to its `Debug` form
    pub fn with_json<K, T>(self, key: K, value: &T) -> Self
    where
        K: Into<String>,
        T: Serialize + fmt::Debug + ?Sized,
    {
        self.with_field(key, FieldValue::json(value))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn call_site(&self) -> CallSite {
        self.call_site
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn info(self, message: impl Display) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(self, message: impl Display) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(self, message: impl Display) {
        self.log(LogLevel::Error, message);
    }

    /// Log the space-joined `Display` forms of `args`
    pub fn info_args(self, args: &[&dyn Display]) {
        self.log(LogLevel::Info, join_args(args));
    }

    pub fn warn_args(self, args: &[&dyn Display]) {
        self.log(LogLevel::Warn, join_args(args));
    }

    pub fn error_args(self, args: &[&dyn Display]) {
        self.log(LogLevel::Error, join_args(args));
    }

    /// Log preformatted arguments, usually built with `format_args!`
    pub fn infof(self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    pub fn warnf(self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    pub fn errorf(self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }

    /// Write the entry at `level`.
    ///
    /// Write failures are counted in the logger metrics and passed to the
    /// configured write-error callback; they never reach the caller.
    pub fn log(self, level: LogLevel, message: impl Display) {
        let logger = self.logger;
        if let Err(err) = self.try_log(level, message) {
            logger.report_write_error(&err);
        }
    }

    /// Write the entry at `level`, returning the number of bytes written
    pub fn try_log(mut self, level: LogLevel, message: impl Display) -> Result<usize> {
        self.level = level;
        self.message = message.to_string();
        renderer::write_entry(self.logger, &self)
    }
}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("timestamp", &self.timestamp)
            .field("call_site", &self.call_site)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

fn join_args(args: &[&dyn Display]) -> String {
    let mut message = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i != 0 {
            message.push(' ');
        }
        let _ = write!(message, "{}", arg);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::LogContext;
    use chrono::TimeZone;

    fn memory_logger() -> (Logger, MemoryAppender) {
        let memory = MemoryAppender::new();
        let logger = Logger::builder().writer(memory.clone()).build();
        (logger, memory)
    }

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2022, 1, 11, 15, 48, 5)
            .earliest()
            .expect("valid local time")
            + chrono::Duration::milliseconds(595)
    }

    #[test]
    fn test_with_field_appends_in_order() {
        let (logger, _) = memory_logger();
        let entry = logger
            .entry()
            .with_field("b", 1)
            .with_field("a", "x")
            .with_field("b", 2);

        let keys: Vec<&str> = entry.fields().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["b", "a", "b"]);
    }

    #[test]
    fn test_with_fields_even_rest() {
        let (logger, _) = memory_logger();
        let entry = logger.entry().with_fields(
            "name",
            "jack",
            "age",
            18,
            [FieldValue::from("city"), FieldValue::from("paris")],
        );

        assert_eq!(
            entry.fields(),
            &[
                Field::new("name", "jack"),
                Field::new("age", 18),
                Field::new("city", "paris"),
            ]
        );
    }

    #[test]
    fn test_with_fields_odd_rest_gets_sentinel() {
        let (logger, _) = memory_logger();
        let entry = logger.entry().with_fields(
            "a",
            1,
            "b",
            2,
            [FieldValue::from("c"), FieldValue::from(3), FieldValue::from(404)],
        );

        assert_eq!(entry.fields().len(), 4);
        assert_eq!(entry.fields()[2], Field::new("c", 3));
        assert_eq!(entry.fields()[3], Field::new("404", MISSING_VALUE));
    }

    #[test]
    fn test_with_fields_empty_rest() {
        let (logger, _) = memory_logger();
        let entry = logger
            .entry()
            .with_fields("a", 1, "b", 2, std::iter::empty());
        assert_eq!(entry.fields().len(), 2);
    }

    #[test]
    fn test_info_renders_example_line() {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .writer(memory.clone())
            .ctx_keys(["tid"])
            .build();
        let ctx = LogContext::new().with_value("tid", 123456);

        logger
            .ctx_at(CallSite::new("mylog_test.rs", 16, "mylog::test_ctx"), &ctx)
            .at(fixed_time())
            .info("hello");

        assert_eq!(
            memory.contents(),
            "[INFO] 2022-01-11 15:48:05.595 mylog_test.rs 16 mylog::test_ctx hello {\"tid\":123456}\n"
        );
    }

    #[test]
    fn test_args_are_space_joined() {
        let (logger, memory) = memory_logger();
        logger
            .entry_at(CallSite::default())
            .at(fixed_time())
            .warn_args(&[&"disk", &93, &"percent"]);

        assert_eq!(
            memory.contents(),
            "[WARN] 2022-01-11 15:48:05.595  0  disk 93 percent\n"
        );
    }

    #[test]
    fn test_formatted_message() {
        let (logger, memory) = memory_logger();
        logger
            .entry()
            .errorf(format_args!("retry {} of {}", 3, 5));

        let line = memory.contents();
        assert!(line.starts_with("[ERROR] "));
        assert!(line.ends_with(" retry 3 of 5\n"));
    }

    #[test]
    fn test_entry_captures_caller_line() {
        let (logger, _) = memory_logger();
        let expected = line!() + 1;
        let entry = logger.entry();
        assert_eq!(entry.call_site().file, "entry.rs");
        assert_eq!(entry.call_site().line, expected);
        entry.info("done");
    }

    #[test]
    fn test_join_args() {
        assert_eq!(join_args(&[]), "");
        assert_eq!(join_args(&[&"a"]), "a");
        assert_eq!(join_args(&[&"a", &1, &2.5]), "a 1 2.5");
    }
}
