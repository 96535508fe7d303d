//! Child loggers example
//!
//! Demonstrates copies sharing context and appenders, replacing context on
//! a copy, and disabling appenders by id or instance.
//!
//! Run with: cargo run --example child_loggers

use namedlog::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

fn main() {
    println!("=== namedlog - Child Loggers Example ===\n");

    let console: Arc<dyn Appender> = Arc::new(ConsoleAppender::new());
    let root = Logger::builder("gateway")
        .shared_appender(Arc::clone(&console))
        .context_field("env", "prod")
        .build();

    println!("1. A copy shares the context map:");
    let mut users = root.named("gateway/users");
    users.add_context_key("team", "identity");
    root.info(format!("root context: {}", root.context()));

    println!("\n2. Replacing the copy's context leaves the root alone:");
    users.set_context(HashMap::from([("scope".to_string(), FieldValue::from("users"))]));
    users.info(format!("users context: {}", users.context()));
    root.info(format!("root context: {}", root.context()));

    println!("\n3. Disabling the console by instance silences both loggers:");
    root.disable(&console);
    users.info("not printed");
    println!("   appenders left: {:?}", root.appender_ids());

    println!("\n=== Example completed successfully! ===");
}
