//! Basic logger usage example
//!
//! Demonstrates console logging at each level, extra fields and formatted
//! messages.
//!
//! Run with: cargo run --example basic_usage

use ctx_logger::prelude::*;
use ctx_logger::{entry, info, warn};

fn main() -> Result<()> {
    println!("=== Ctx Logger - Basic Usage Example ===\n");

    // Every level goes to stdout
    let logger = Logger::new();

    println!("1. Logging at different levels:");
    entry!(logger).info("This is an info message");
    entry!(logger).warn("This is a warning message");
    entry!(logger).error("This is an error message");

    println!("\n2. Logging with fields:");
    entry!(logger)
        .with_field("name", "jack")
        .with_field("age", 18)
        .with_field("profile", r#"{"vip":true}"#)
        .info("user loaded");
    entry!(logger)
        .with_fields("host", "db-1", "port", 5432, [FieldValue::from("retry")])
        .warn("connection slow");

    println!("\n3. Formatted messages:");
    info!(entry!(logger), "Processing {} items", 100);
    warn!(entry!(logger).with_field("attempt", 3), "Retry {} of {}", 3, 5);

    println!("\n4. Space-joined arguments:");
    entry!(logger).info_args(&[&"disk", &93, &"percent"]);

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
