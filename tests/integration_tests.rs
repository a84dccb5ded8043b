//! Integration tests for the logger
//!
//! These tests verify:
//! - The rendered line layout
//! - Field encoding rules through the public API
//! - Per-level routing to files
//! - Write failure handling

use ctx_logger::appenders::{FileAppender, MemoryAppender, MultiAppender};
use ctx_logger::core::{Appender, CallSite, FieldValue, LogContext, LogLevel, Logger};
use ctx_logger::{LoggerError, TimestampFormat, MISSING_VALUE};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn memory_logger(keys: &[&str]) -> (Logger, MemoryAppender) {
    let memory = MemoryAppender::new();
    let logger = Logger::builder()
        .writer(memory.clone())
        .ctx_keys(keys.iter().copied())
        .build();
    (logger, memory)
}

/// Drop the `[LEVEL] timestamp ` prefix, which depends on the clock
fn after_timestamp(line: &str) -> &str {
    let rest = line.split_once("] ").expect("level tag").1;
    // date and time are the next two tokens
    let mut parts = rest.splitn(3, ' ');
    parts.next();
    parts.next();
    parts.next().expect("line body")
}

#[test]
fn test_line_layout() {
    let (logger, memory) = memory_logger(&["tid"]);
    let ctx = LogContext::new().with_value("tid", 123456);

    logger
        .ctx_at(CallSite::new("mylog_test.rs", 16, "mylog::test_ctx"), &ctx)
        .info("hello");

    let line = memory.contents();
    assert!(line.starts_with("[INFO] "));
    assert!(line.ends_with('\n'));
    assert_eq!(line.matches('\n').count(), 1);
    assert_eq!(
        after_timestamp(line.trim_end()),
        "mylog_test.rs 16 mylog::test_ctx hello {\"tid\":123456}"
    );

    // 2022-01-11 15:48:05.595
    let timestamp = &line["[INFO] ".len().."[INFO] ".len() + 23];
    assert!(chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.3f").is_ok());
}

#[test]
fn test_no_fields_no_brace_section() {
    let (logger, memory) = memory_logger(&["tid"]);

    logger
        .ctx_at(CallSite::new("a.rs", 3, "m::f"), &LogContext::new())
        .warn("plain");

    assert_eq!(after_timestamp(&memory.contents()), "a.rs 3 m::f plain\n");
}

#[test]
fn test_field_encoding_rules() {
    #[derive(Serialize, Debug)]
    struct User {
        id: u32,
        roles: Vec<&'static str>,
    }

    let (logger, memory) = memory_logger(&[]);
    let user = User {
        id: 7,
        roles: vec!["admin"],
    };

    logger
        .entry_at(CallSite::default())
        .with_field("raw_obj", r#"{"a":1}"#)
        .with_field("raw_arr", b"[1,2]".to_vec())
        .with_field("text", "jack")
        .with_display("addr", &std::net::Ipv4Addr::LOCALHOST)
        .with_json("user", &user)
        .with_field("n", 1.5)
        .info("fields");

    let line = memory.contents();
    let fields = line.split_once(" fields ").expect("message").1;
    assert_eq!(
        fields,
        "{\"raw_obj\":{\"a\":1},\"raw_arr\":[1,2],\"text\":\"jack\",\"addr\":\"127.0.0.1\",\
         \"user\":{\"id\":7,\"roles\":[\"admin\"]},\"n\":1.5}\n"
    );
}

#[test]
fn test_rendered_fields_parse_as_json() {
    let (logger, memory) = memory_logger(&[]);
    let mut nested = BTreeMap::new();
    nested.insert("k1", "v1");

    logger
        .entry()
        .with_json("a", &nested)
        .with_field("count", 3)
        .with_field("msg", "plain text")
        .info("json");

    let line = memory.contents();
    let fields = line.split_once(" json ").expect("message").1.trim_end();
    let parsed: serde_json::Value = serde_json::from_str(fields).expect("valid JSON");
    assert_eq!(parsed["a"]["k1"], "v1");
    assert_eq!(parsed["count"], 3);
    assert_eq!(parsed["msg"], "plain text");
}

#[test]
fn test_odd_field_list_sentinel() {
    let (logger, memory) = memory_logger(&[]);

    logger
        .entry_at(CallSite::default())
        .with_fields("a", 1, "b", 2, [FieldValue::from("dangling")])
        .error("odd");

    assert!(memory
        .contents()
        .ends_with(&format!("odd {{\"a\":1,\"b\":2,\"dangling\":\"{}\"}}\n", MISSING_VALUE)));
}

#[test]
fn test_duplicate_keys_render_in_order() {
    let (logger, memory) = memory_logger(&["tid"]);
    let ctx = LogContext::new().with_value("tid", 1);

    logger
        .ctx(&ctx)
        .with_field("tid", 2)
        .with_field("x", "y")
        .with_field("tid", 3)
        .info("dups");

    assert!(memory
        .contents()
        .ends_with("dups {\"tid\":1,\"tid\":2,\"x\":\"y\",\"tid\":3}\n"));
}

#[test]
fn test_level_routing_to_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let info_path = temp_dir.path().join("info.log");
    let err_path = temp_dir.path().join("err.log");

    let info: Arc<dyn Appender> =
        Arc::new(FileAppender::new(&info_path).expect("Failed to create appender"));
    let err_file: Arc<dyn Appender> =
        Arc::new(FileAppender::new(&err_path).expect("Failed to create appender"));
    let err: Arc<dyn Appender> =
        Arc::new(MultiAppender::new(vec![Arc::clone(&info), err_file]));

    let logger = Logger::builder()
        .writers(Arc::clone(&info), Arc::clone(&info), err)
        .build();

    logger.info("started");
    logger.warn("slow");
    logger.entry().with_field("code", 500).error("failed");
    logger.flush().expect("Failed to flush");

    let info_content = fs::read_to_string(&info_path).expect("Failed to read log file");
    let err_content = fs::read_to_string(&err_path).expect("Failed to read log file");

    let info_lines: Vec<&str> = info_content.lines().collect();
    assert_eq!(info_lines.len(), 3);
    assert!(info_lines[0].starts_with("[INFO] "));
    assert!(info_lines[1].starts_with("[WARN] "));
    assert!(info_lines[2].starts_with("[ERROR] "));

    let err_lines: Vec<&str> = err_content.lines().collect();
    assert_eq!(err_lines.len(), 1);
    assert!(err_lines[0].ends_with("failed {\"code\":500}"));
    assert!(err_lines[0].contains(" integration_tests.rs "));
}

#[test]
fn test_write_failures_are_swallowed() {
    struct FailingAppender {
        attempts: AtomicUsize,
    }

    impl Appender for FailingAppender {
        fn append(&self, _line: &[u8]) -> ctx_logger::Result<usize> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(LoggerError::writer("failing", "simulated failure"))
        }

        fn flush(&self) -> ctx_logger::Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    let failing = Arc::new(FailingAppender {
        attempts: AtomicUsize::new(0),
    });
    let logger = Logger::builder()
        .writers(failing.clone(), failing.clone(), failing.clone())
        .build();

    for i in 0..5 {
        logger.entry().with_field("i", i).info("will fail");
    }

    assert_eq!(failing.attempts.load(Ordering::SeqCst), 5);
    assert_eq!(logger.metrics().write_failures(), 5);
    assert_eq!(logger.metrics().total_logged(), 0);

    let err = logger
        .entry()
        .try_log(LogLevel::Warn, "surfaced")
        .unwrap_err();
    assert!(err.to_string().contains("simulated failure"));
}

#[test]
fn test_custom_timestamp_format() {
    let memory = MemoryAppender::new();
    let logger = Logger::builder()
        .writer(memory.clone())
        .timestamp_format(TimestampFormat::Custom("%Y".to_string()))
        .build();

    logger.entry_at(CallSite::default()).info("year");

    let line = memory.contents();
    let year: i32 = line[7..11].parse().expect("four digit year");
    assert!(year >= 2024);
    assert!(line.ends_with("  0  year\n"));
}

#[test]
fn test_invalid_custom_timestamp_never_panics() {
    let memory = MemoryAppender::new();
    let logger = Logger::builder()
        .writer(memory.clone())
        .timestamp_format(TimestampFormat::Custom("%Q bad".to_string()))
        .build();

    logger.entry_at(CallSite::default()).info("hello");

    let line = memory.contents();
    let timestamp = &line["[INFO] ".len().."[INFO] ".len() + 23];
    assert!(chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.3f").is_ok());
    assert!(line.ends_with("  0  hello\n"));
    assert_eq!(logger.metrics().total_logged(), 1);
}
