//! File logging example
//!
//! Demonstrates per-level destinations: every line goes to a file, errors
//! are also copied to stderr.
//!
//! Run with: cargo run --example file_logging

use ctx_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Ctx Logger - File Logging Example ===\n");

    let file: Arc<dyn Appender> = Arc::new(FileAppender::new("application.log")?);
    let errors: Arc<dyn Appender> = Arc::new(
        MultiAppender::new(vec![Arc::clone(&file)]).with(Arc::new(ConsoleAppender::stderr())),
    );

    let logger = Logger::builder()
        .writers(Arc::clone(&file), Arc::clone(&file), errors)
        .on_write_error(Arc::new(|err| eprintln!("log write failed: {}", err)))
        .build();

    println!("1. Logging to application.log:");
    logger.info("Application started");
    logger.entry().with_field("path", "config.toml").info("Configuration loaded");
    logger.warn("Using default settings for some options");
    logger.entry().with_field("plugin", "metrics").error("Failed to load optional plugin");
    logger.info("Application initialization complete");

    logger.flush()?;

    let metrics = logger.metrics().clone();
    println!("\n2. Metrics:");
    println!("   lines written:  {}", metrics.total_logged());
    println!("   write failures: {}", metrics.write_failures());

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the logged messages.");
    Ok(())
}
