//! Timestamp formatting and line layout options
//!
//! The default layout renders local time as `2022-01-11 15:48:05.595`.
//! Other formats are available for deployments whose log shippers expect
//! them.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Write};

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use ctx_logger::core::TimestampFormat;
/// use chrono::Local;
///
/// let format = TimestampFormat::Standard;
/// let timestamp = format.format(&Local::now());
/// assert_eq!(timestamp.len(), "2022-01-11 15:48:05.595".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2022-01-11 15:48:05.595`, millisecond precision
    #[default]
    Standard,

    /// ISO 8601 with milliseconds: `2022-01-11T15:48:05.595+08:00`
    Iso8601,

    /// RFC 3339 format: `2022-01-11T15:48:05.595123+08:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1641887285595`
    UnixMillis,

    /// Custom strftime format
    ///
    /// # Examples
    ///
    /// ```
    /// use ctx_logger::core::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a timestamp according to this format
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut buf = Vec::with_capacity(32);
        self.write_to(&mut buf, datetime);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Append the formatted timestamp to `buf`.
    ///
    /// A custom pattern that chrono cannot render falls back to `Standard`.
    pub fn write_to<Tz>(&self, buf: &mut Vec<u8>, datetime: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let start = buf.len();
        let written = match self {
            TimestampFormat::Standard => write_standard(buf, datetime),
            TimestampFormat::Iso8601 => write!(
                VecWriter(buf),
                "{}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z")
            ),
            TimestampFormat::Rfc3339 => write!(VecWriter(buf), "{}", datetime.to_rfc3339()),
            TimestampFormat::UnixMillis => {
                write!(VecWriter(buf), "{}", datetime.timestamp_millis())
            }
            TimestampFormat::Custom(format_str) => {
                write!(VecWriter(buf), "{}", datetime.format(format_str))
            }
        };

        if written.is_err() {
            buf.truncate(start);
            let _ = write_standard(buf, datetime);
        }
    }

    /// Whether chrono accepts every specifier of a custom pattern
    ///
    /// ```
    /// use ctx_logger::core::TimestampFormat;
    ///
    /// assert!(TimestampFormat::Custom("%Y/%m/%d".into()).is_valid());
    /// assert!(!TimestampFormat::Custom("%Q".into()).is_valid());
    /// ```
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(format_str) => {
                !StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }

    /// Check if this is a numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::UnixMillis)
    }
}

/// `fmt::Write` over a byte buffer, so formatting errors come back as `Err`
struct VecWriter<'a>(&'a mut Vec<u8>);

impl fmt::Write for VecWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

fn write_standard<Tz>(buf: &mut Vec<u8>, datetime: &DateTime<Tz>) -> fmt::Result
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    write!(VecWriter(buf), "{}", datetime.format("%Y-%m-%d %H:%M:%S%.3f"))
}

/// Layout options for rendered lines
///
/// # Examples
///
/// ```
/// use ctx_logger::core::{FormatterConfig, TimestampFormat};
///
/// let config = FormatterConfig::new()
///     .with_timestamp_format(TimestampFormat::Iso8601)
///     .with_file_line(false);
/// assert!(!config.include_file_line);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Timestamp format for log lines
    pub timestamp_format: TimestampFormat,
    /// Whether to render the `file line` tokens
    pub include_file_line: bool,
    /// Whether to render the function token
    pub include_function: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            include_file_line: true,
            include_function: true,
        }
    }
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_file_line(mut self, include: bool) -> Self {
        self.include_file_line = include;
        self
    }

    #[must_use]
    pub fn with_function(mut self, include: bool) -> Self {
        self.include_function = include;
        self
    }
}
