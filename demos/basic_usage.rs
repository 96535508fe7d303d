//! Basic logger usage example
//!
//! Demonstrates console logging at different levels, formatted messages and
//! the fatal signal.
//!
//! Run with: cargo run --example basic_usage

use namedlog::prelude::*;
use namedlog::{debug, info};

fn main() {
    println!("=== namedlog - Basic Usage Example ===\n");

    let mut logger = Logger::builder("service/user-auth/handler")
        .min_level(Level::DEBUG)
        .appender(ConsoleAppender::new())
        .build();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Formatted messages and data:");
    debug!(logger, "cache hit ratio {:.2}", 0.93);
    info!(logger, "listening on port {}", 8080);
    logger.info_with("request served", vec![FieldValue::from(200), FieldValue::from("GET")]);

    println!("\n3. Raising the minimum level to WARN:");
    logger.set_level(Level::WARN);
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\n4. PANIC logs, then returns a fatal error:");
    if let Err(err) = logger.panic("unrecoverable state") {
        println!("   caller received: {}", err);
    }

    println!("\n=== Example completed successfully! ===");
}
