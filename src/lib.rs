//! # Ctx Logger
//!
//! A leveled, structured logging facade. Each call builds an entry that
//! carries its call site, a timestamp, request context fields and any extra
//! key/value fields, and writes it as one line:
//!
//! ```text
//! [INFO] 2022-01-11 15:48:05.595 main.rs 16 app::main hello {"tid":123456,"name":"jack"}
//! ```
//!
//! ## Features
//!
//! - **Context Fields**: configured keys are pulled from a request context
//! - **Raw JSON Passthrough**: JSON-shaped strings and serializable values are
//!   embedded unquoted
//! - **Per-Level Destinations**: info, warn and error lines can go to
//!   different appenders
//! - **Thread Safe**: render buffers are pooled and shared safely
//!
//! ## Example
//!
//! ```
//! use ctx_logger::prelude::*;
//! use ctx_logger::entry;
//!
//! let memory = MemoryAppender::new();
//! let logger = Logger::builder()
//!     .writer(memory.clone())
//!     .ctx_keys(["tid"])
//!     .build();
//!
//! let ctx = LogContext::new().with_value("tid", 123456);
//! entry!(logger, &ctx).with_field("name", "jack").info("hello");
//!
//! assert!(memory.contents().ends_with("hello {\"tid\":123456,\"name\":\"jack\"}\n"));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{
        ConsoleAppender, ConsoleTarget, FileAppender, MemoryAppender, MultiAppender,
        WriterAppender,
    };
    pub use crate::core::{
        Appender, CallSite, ContextSource, Entry, Field, FieldValue, FormatterConfig, LogContext,
        LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result, TimestampFormat,
        WriteErrorCallback, MISSING_VALUE,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender, MultiAppender, WriterAppender};
pub use core::{
    ctx, global, init, init_with, Appender, CallSite, ContextSource, Entry, Field, FieldValue,
    FormatterConfig, LogContext, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    Result, Router, TimestampFormat, WriteErrorCallback, MISSING_VALUE,
};
