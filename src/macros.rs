//! Logging macros for call-site capture and formatted messages.
//!
//! `entry!` and `ctx!` record the file, line and function of their expansion
//! site.
//! The level macros take an entry and format the message like `format!`.
//!
//! # Examples
//!
//! ```
//! use ctx_logger::prelude::*;
//! use ctx_logger::{entry, info, warn};
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(entry!(logger), "Server started");
//!
//! // With format arguments and fields
//! let port = 8080;
//! warn!(entry!(logger).with_field("port", port), "Port {} already bound", port);
//! ```

/// Capture the current file, line and function as a `CallSite`.
///
/// # Examples
///
/// ```
/// let site = ctx_logger::call_site!();
/// assert!(site.file.ends_with(".rs"));
/// assert!(site.line > 0);
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        static __FUNCTION: ::std::sync::OnceLock<&'static str> = ::std::sync::OnceLock::new();
        $crate::core::CallSite::new(
            $crate::core::call_site::base_name(file!()),
            line!(),
            *__FUNCTION.get_or_init(|| $crate::core::call_site::intern_function(__type_name_of(__f))),
        )
    }};
}

/// Start an entry at the macro's call site, optionally extracting context
/// fields.
///
/// # Examples
///
/// ```
/// # use ctx_logger::prelude::*;
/// use ctx_logger::entry;
///
/// let logger = Logger::builder().ctx_keys(["tid"]).build();
/// let ctx = LogContext::new().with_value("tid", 42);
///
/// entry!(logger).info("no context");
/// entry!(logger, &ctx).info("with context");
/// ```
#[macro_export]
macro_rules! entry {
    ($logger:expr) => {
        $logger.entry_at($crate::call_site!())
    };
    ($logger:expr, $ctx:expr) => {
        $logger.ctx_at($crate::call_site!(), $ctx)
    };
}

/// Start an entry on the process-wide logger at the macro's call site, with
/// the configured context keys extracted from `ctx`.
///
/// # Examples
///
/// ```
/// use ctx_logger::prelude::*;
///
/// let ctx = LogContext::new().with_value("tid", 123456);
/// ctx_logger::ctx!(&ctx).with_field("name", "jack").info("hello");
/// ```
#[macro_export]
macro_rules! ctx {
    ($ctx:expr) => {
        $crate::global().ctx_at($crate::call_site!(), $ctx)
    };
}

/// Log an entry at a given level with a formatted message.
///
/// # Examples
///
/// ```
/// # use ctx_logger::prelude::*;
/// # let logger = Logger::new();
/// use ctx_logger::{entry, log};
/// log!(entry!(logger), LogLevel::Info, "Simple message");
/// log!(entry!(logger), LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($entry:expr, $level:expr, $($arg:tt)+) => {
        $entry.log($level, format_args!($($arg)+))
    };
}

/// Log an entry at info level.
///
/// # Examples
///
/// ```
/// # use ctx_logger::prelude::*;
/// # let logger = Logger::new();
/// use ctx_logger::{entry, info};
/// info!(entry!(logger), "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($entry:expr, $($arg:tt)+) => {
        $entry.infof(format_args!($($arg)+))
    };
}

/// Log an entry at warn level.
///
/// # Examples
///
/// ```
/// # use ctx_logger::prelude::*;
/// # let logger = Logger::new();
/// use ctx_logger::{entry, warn};
/// warn!(entry!(logger), "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($entry:expr, $($arg:tt)+) => {
        $entry.warnf(format_args!($($arg)+))
    };
}

/// Log an entry at error level.
///
/// # Examples
///
/// ```
/// # use ctx_logger::prelude::*;
/// # let logger = Logger::new();
/// use ctx_logger::{entry, error};
/// error!(entry!(logger), "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($entry:expr, $($arg:tt)+) => {
        $entry.errorf(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::MemoryAppender;
    use crate::core::{LogContext, LogLevel, Logger};

    fn memory_logger() -> (Logger, MemoryAppender) {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .writer(memory.clone())
            .ctx_keys(["tid"])
            .build();
        (logger, memory)
    }

    #[test]
    fn test_entry_macro_captures_function() {
        let (logger, memory) = memory_logger();
        let line = line!() + 1;
        entry!(logger).info("located");

        let expected = format!(" macros.rs {} tests::test_entry_macro_captures_function located\n", line);
        assert!(memory.contents().ends_with(&expected), "{}", memory.contents());
    }

    #[test]
    fn test_entry_macro_with_context() {
        let (logger, memory) = memory_logger();
        let ctx = LogContext::new().with_value("tid", 9);
        entry!(logger, &ctx).info("ctx");
        assert!(memory.contents().ends_with(" ctx {\"tid\":9}\n"));
    }

    #[test]
    fn test_entry_macro_inside_closure() {
        let (logger, memory) = memory_logger();
        let run = || entry!(logger).warn("closure");
        run();
        assert!(memory
            .contents()
            .contains(" tests::test_entry_macro_inside_closure closure"));
    }

    #[test]
    fn test_entry_macro_inside_trait_impl() {
        use std::fmt;

        struct Located(Logger);

        impl fmt::Display for Located {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                entry!(self.0).info("in trait impl");
                f.write_str("located")
            }
        }

        let (logger, memory) = memory_logger();
        let _ = Located(logger).to_string();
        assert!(
            memory.contents().ends_with(" Located::fmt in trait impl\n"),
            "{}",
            memory.contents()
        );
    }

    #[test]
    fn test_call_site_macro_reuses_function_name() {
        let sites: Vec<_> = (0..3).map(|_| call_site!()).collect();
        assert!(sites.windows(2).all(|w| std::ptr::eq(w[0].function, w[1].function)));
        assert_eq!(sites[0].function, "tests::test_call_site_macro_reuses_function_name");
    }

    #[test]
    fn test_level_macros() {
        let (logger, memory) = memory_logger();
        info!(entry!(logger), "Items: {}", 100);
        warn!(entry!(logger), "Retry {} of {}", 1, 3);
        error!(entry!(logger).with_field("code", 500), "Code: {}", 500);
        log!(entry!(logger), LogLevel::Info, "Formatted: {}", 42);

        let lines = memory.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("[INFO] ") && lines[0].ends_with("Items: 100"));
        assert!(lines[1].starts_with("[WARN] ") && lines[1].ends_with("Retry 1 of 3"));
        assert!(lines[2].starts_with("[ERROR] ") && lines[2].ends_with("Code: 500 {\"code\":500}"));
        assert!(lines[3].ends_with("Formatted: 42"));
    }
}
