//! File logging example
//!
//! Demonstrates text and JSON file sinks side by side.
//!
//! Run with: cargo run --example file_logging

use namedlog::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== namedlog - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("namedlog-demo");
    fs::create_dir_all(&dir)?;
    let text_path = dir.join("app.log");
    let json_path = dir.join("app.jsonl");

    let logger = Logger::builder("billing")
        .min_level(Level::DEBUG)
        .appender(FileAppender::new(&text_path)?)
        .appender(JsonAppender::new(&json_path)?)
        .context_field("env", "demo")
        .build();

    for i in 0..5 {
        logger.info_with(format!("invoice {} sent", i), vec![FieldValue::from(i)]);
    }
    logger.warn("payment provider slow");
    logger.flush()?;

    println!("Text log:\n{}", fs::read_to_string(&text_path)?);
    println!("JSON log:\n{}", fs::read_to_string(&json_path)?);

    println!("=== Example completed successfully! ===");
    Ok(())
}
