//! Integration tests for the logger pipeline
//!
//! These tests verify:
//! - Level gating and the inclusive threshold
//! - Ordered fan-out with identical records
//! - Enable/disable bookkeeping
//! - Context sharing between copies
//! - File and JSON sinks end to end
//! - Fault isolation and escalation

use namedlog::appenders::file::FileAppender;
use namedlog::appenders::json::JsonAppender;
use namedlog::core::appender::{Appender, DisableTarget};
use namedlog::core::context::FieldValue;
use namedlog::core::error::{LoggerError, Result};
use namedlog::core::level::Level;
use namedlog::core::logger::Logger;
use namedlog::core::record::Record;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// What an appender saw, detached from the record's lifetime
#[derive(Debug, Clone, PartialEq)]
struct Seen {
    appender: String,
    logger: String,
    level: Level,
    message: String,
    data: Vec<FieldValue>,
    ctx: HashMap<String, FieldValue>,
    timestamp: chrono::DateTime<chrono::Utc>,
}

struct Recorder {
    id: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Recorder {
    fn shared(id: &str, seen: &Arc<Mutex<Vec<Seen>>>) -> Arc<dyn Appender> {
        Arc::new(Self {
            id: id.to_string(),
            seen: Arc::clone(seen),
        })
    }
}

impl Appender for Recorder {
    fn append(&self, record: &Record<'_>) -> Result<()> {
        self.seen.lock().push(Seen {
            appender: self.id.clone(),
            logger: record.logger_name().to_string(),
            level: record.level,
            message: record.message.clone(),
            data: record.data.clone(),
            ctx: record.context.snapshot(),
            timestamp: record.timestamp,
        });
        Ok(())
    }

    fn id(&self) -> &str {
        &self.id
    }
}

fn new_journal() -> Arc<Mutex<Vec<Seen>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[test]
fn test_log_levels() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("levels_test.log");

    let logger = Logger::builder("levels").min_level(Level::WARN).build();
    let appender = FileAppender::new(&log_file).expect("Failed to create appender");
    logger.enable(Arc::new(appender));

    logger.debug("Debug message");
    logger.info("Info message");
    logger.warn("Warn message");
    logger.error("Error message");
    let fatal = logger.panic("Panic message");

    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(!content.contains("Debug message"));
    assert!(!content.contains("Info message"));
    assert!(content.contains("Warn message"));
    assert!(content.contains("Error message"));
    assert!(content.contains("Panic message"));
    assert!(fatal.expect_err("panic must signal").is_fatal());
}

#[test]
fn test_panic_record_on_disk_when_fatal_returns() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let text_file = temp_dir.path().join("crash.log");
    let json_file = temp_dir.path().join("crash.jsonl");

    let logger = Logger::builder("storage")
        .appender(FileAppender::new(&text_file).expect("Failed to create appender"))
        .appender(JsonAppender::new(&json_file).expect("Failed to create appender"))
        .build();

    let fatal = logger.panic("out of disk");
    assert!(fatal.expect_err("panic must signal").is_fatal());

    // Read while the logger and its buffered appenders are still alive
    let text = fs::read_to_string(&text_file).expect("Failed to read log file");
    let json = fs::read_to_string(&json_file).expect("Failed to read json file");
    assert!(text.contains("[PANIC] [storage] out of disk"));
    assert!(json.contains("out of disk"));
    assert_eq!(logger.appender_count(), 2);
}

#[test]
fn test_boundary_level_is_emitted() {
    let seen = new_journal();
    let logger = Logger::builder("boundary")
        .min_level(Level::INFO)
        .shared_appender(Recorder::shared("r", &seen))
        .build();

    logger.log(Level::new(20, "NOTICE", "*", "white"), "same value", vec![]);
    logger.log(Level::new(19, "CHATTY", "*", "white"), "just below", vec![]);

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message, "same value");
    assert_eq!(seen[0].level.name, "NOTICE");
}

#[test]
fn test_fan_out_order_and_identical_records() {
    let seen = new_journal();
    let logger = Logger::builder("fanout").build();
    for id in ["A", "B", "C"] {
        logger.enable(Recorder::shared(id, &seen));
    }

    logger.info_with("payload", vec![FieldValue::from(1), FieldValue::from("two")]);

    let seen = seen.lock();
    let order: Vec<&str> = seen.iter().map(|s| s.appender.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C"]);

    for s in seen.iter().skip(1) {
        assert_eq!(s.timestamp, seen[0].timestamp);
        assert_eq!(s.message, seen[0].message);
        assert_eq!(s.data, seen[0].data);
        assert_eq!(s.level, seen[0].level);
    }
}

#[test]
fn test_disable_removes_exactly_one() {
    let seen = new_journal();
    let logger = Logger::builder("registry").build();
    let audit = Recorder::shared("audit", &seen);

    logger
        .enable(Recorder::shared("first", &seen))
        .enable(Arc::clone(&audit))
        .enable(Recorder::shared("middle", &seen))
        .enable(Arc::clone(&audit));

    assert!(logger.disable(DisableTarget::ByInstance(Arc::clone(&audit))));
    assert_eq!(logger.appender_ids(), vec!["first", "middle", "audit"]);

    logger.info("once");
    assert_eq!(seen.lock().iter().filter(|s| s.appender == "audit").count(), 1);
}

#[test]
fn test_disable_by_same_id_different_instance() {
    let seen = new_journal();
    let logger = Logger::builder("registry").build();
    logger.enable(Recorder::shared("console", &seen));

    let lookalike = Recorder::shared("console", &seen);
    assert!(logger.disable(&lookalike));
    assert_eq!(logger.appender_count(), 0);
}

#[test]
fn test_disable_unknown_is_noop() {
    let seen = new_journal();
    let logger = Logger::builder("registry").build();
    logger
        .enable(Recorder::shared("a", &seen))
        .enable(Recorder::shared("b", &seen));

    assert!(!logger.disable("nope"));
    assert!(!logger.disable(String::from("also-nope")));
    assert_eq!(logger.appender_ids(), vec!["a", "b"]);
}

#[test]
fn test_copy_context_aliasing() {
    let seen = new_journal();
    let original = Logger::builder("svc")
        .context_field("env", "prod")
        .shared_appender(Recorder::shared("r", &seen))
        .build();

    let mut copy = original.copy();
    copy.add_context_key("k", "v");

    original.info("from original");
    copy.info("from copy");
    {
        let seen = seen.lock();
        for s in seen.iter() {
            assert_eq!(s.ctx.get("env"), Some(&FieldValue::from("prod")));
            assert_eq!(s.ctx.get("k"), Some(&FieldValue::from("v")));
        }
    }

    copy.set_context(HashMap::from([(
        "scope".to_string(),
        FieldValue::from("copy-only"),
    )]));
    original.info("after replace");
    copy.info("copy after replace");

    let seen = seen.lock();
    let after_original = &seen[2];
    let after_copy = &seen[3];
    assert!(after_original.ctx.get("scope").is_none());
    assert_eq!(after_original.ctx.get("k"), Some(&FieldValue::from("v")));
    assert_eq!(after_copy.ctx.len(), 1);
    assert_eq!(after_copy.ctx.get("scope"), Some(&FieldValue::from("copy-only")));
}

#[test]
fn test_named_copy_keeps_config() {
    let seen = new_journal();
    let parent = Logger::builder("api")
        .min_level(Level::ERROR)
        .shared_appender(Recorder::shared("r", &seen))
        .build();

    let child = parent.named("api/users");
    child.warn("suppressed");
    child.error("kept");

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].logger, "api/users");
}

#[test]
fn test_multiple_file_appenders() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file1 = temp_dir.path().join("multi1.log");
    let log_file2 = temp_dir.path().join("multi2.jsonl");

    let logger = Logger::builder("multi")
        .appender(FileAppender::new(&log_file1).expect("Failed to create appender"))
        .appender(JsonAppender::new(&log_file2).expect("Failed to create appender"))
        .context_field("request_id", "abc-def")
        .build();

    logger.info("Test message");
    logger.flush().expect("Failed to flush");

    let text = fs::read_to_string(&log_file1).expect("Failed to read log file 1");
    let json = fs::read_to_string(&log_file2).expect("Failed to read log file 2");

    assert!(text.contains("Test message"));
    assert!(text.contains("request_id=abc-def"));

    let parsed: serde_json::Value = serde_json::from_str(json.trim()).expect("valid JSON line");
    assert_eq!(parsed["message"], "Test message");
    assert_eq!(parsed["ctx"]["request_id"], "abc-def");
    assert!(parsed["level"].get("color").is_none());
    assert!(parsed["level"].get("glyph").is_none());
}

#[test]
fn test_unopenable_file_is_isolated() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let bad_path = temp_dir.path().join("no-such-dir").join("app.log");

    let seen = new_journal();
    let logger = Logger::builder("isolation")
        .appender(FileAppender::lazy(&bad_path))
        .shared_appender(Recorder::shared("after", &seen))
        .build();

    logger.error("disk trouble");

    assert_eq!(seen.lock().len(), 1);
    assert_eq!(logger.metrics().failed(), 1);
    assert_eq!(logger.metrics().emitted(), 1);
}

#[test]
fn test_panic_on_error_escalates_after_all_appenders() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let bad_path = temp_dir.path().join("no-such-dir").join("app.log");

    let seen = new_journal();
    let logger = Logger::builder("strict")
        .appender(FileAppender::lazy(&bad_path).with_id("broken-file"))
        .shared_appender(Recorder::shared("after", &seen))
        .panic_on_error(true)
        .build();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.info("must escalate");
    }));

    let payload = outcome.expect_err("expected escalation");
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert!(message.contains("broken-file"), "got: {}", message);
    assert_eq!(seen.lock().len(), 1, "later appenders still receive the record");
}

#[test]
fn test_panicking_appender_is_isolated() {
    struct Panics;
    impl Appender for Panics {
        fn append(&self, _record: &Record<'_>) -> Result<()> {
            panic!("appender bug");
        }
        fn id(&self) -> &str {
            "panics"
        }
    }

    let seen = new_journal();
    let logger = Logger::builder("isolation")
        .appender(Panics)
        .shared_appender(Recorder::shared("after", &seen))
        .build();

    let record = logger.build_record(Level::INFO, "x".to_string(), vec![]);
    let result = logger.emit(&record);

    assert!(matches!(
        result,
        Err(LoggerError::AppenderFailed { ref appender, ref message })
            if appender == "panics" && message == "appender bug"
    ));
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn test_concurrent_logging_through_copies() {
    let seen = new_journal();
    let logger = Logger::builder("threads")
        .shared_appender(Recorder::shared("r", &seen))
        .build();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let child = logger.named(format!("worker-{}", t));
            std::thread::spawn(move || {
                for i in 0..25 {
                    child.info(format!("Thread {} - Message {}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(seen.lock().len(), 100);
    assert_eq!(logger.metrics().emitted(), 100);
}
