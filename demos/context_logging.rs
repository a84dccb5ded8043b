//! Context logging example
//!
//! Demonstrates the process-wide logger: request context values such as a
//! trace id are copied into every line logged with that context.
//!
//! Run with: cargo run --example context_logging

use ctx_logger::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

fn handle_request(ctx: &LogContext, path: &str) {
    ctx_logger::ctx!(ctx).with_field("path", path).info("request received");

    let mut scores = HashMap::new();
    scores.insert("math", 90);
    ctx_logger::ctx!(ctx)
        .with_json("scores", &scores)
        .with_display("elapsed", &format!("{}ms", 12))
        .info("request handled");
}

fn main() {
    println!("=== Ctx Logger - Context Logging Example ===\n");

    let out: Arc<dyn Appender> = Arc::new(ConsoleAppender::stdout());
    let err: Arc<dyn Appender> = Arc::new(ConsoleAppender::stderr());
    ctx_logger::init(Arc::clone(&out), out, err, ["tid", "uid"]);

    let handles: Vec<_> = (0..3)
        .map(|i| {
            thread::spawn(move || {
                let ctx = LogContext::new()
                    .with_value("tid", 1000 + i)
                    .with_value("uid", format!("user-{}", i));
                handle_request(&ctx, "/orders");
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }

    // Plain maps work as contexts too
    let mut ctx = HashMap::new();
    ctx.insert("tid".to_string(), FieldValue::from(42));
    ctx_logger::ctx!(&ctx).error("payment declined");

    let _ = ctx_logger::global().flush();
    println!("\n=== Example completed successfully! ===");
}
