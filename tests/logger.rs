use futures::future::join_all;
use jsonlog::diagnostics::{DiagnosticBuffer, DiagnosticCollector, TARGET};
use jsonlog::{read_entries, LogLevel, Logger, LoggerOptions, RecordFormat};
use serde_json::json;
use std::collections::BTreeSet;
use std::fs;
use tempfile::tempdir;
use tracing_subscriber::layer::SubscriberExt;

#[tokio::test]
async fn level_wrappers_write_in_call_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logs").join("application.log");
    let logger = Logger::new(&path).unwrap();

    logger.debug("x", None).await;
    logger.info("y", None).await;
    logger.warn("z", None).await;
    logger.error("w", None).await;

    let entries = read_entries(&path).await.unwrap();
    let summary: Vec<_> = entries
        .iter()
        .map(|e| (e.level.as_str(), e.message.as_str(), e.additional_data.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Debug", "x", None),
            ("Information", "y", None),
            ("Warning", "z", None),
            ("Error", "w", None),
        ]
    );
}

#[tokio::test]
async fn critical_entry_keeps_additional_data() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = Logger::new(&path).unwrap();

    logger
        .append("crit", LogLevel::Critical, Some(json!({"code": 500})))
        .await;
    logger
        .critical("again", Some(json!({"code": 501, "details": "Critical failure"})))
        .await;

    let raw: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&fs::read_to_string(&path).unwrap())
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0]["Level"], "Critical");
    assert_eq!(raw[0]["Message"], "crit");
    assert_eq!(raw[0]["AdditionalData"], json!({"code": 500}));
    assert_eq!(raw[1]["AdditionalData"]["details"], "Critical failure");
}

#[tokio::test]
async fn reopening_preserves_existing_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");

    Logger::new(&path).unwrap().info("first", None).await;
    Logger::new(&path).unwrap().info("second", None).await;

    let messages: Vec<_> = read_entries(&path)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.message)
        .collect();
    assert_eq!(messages, ["first", "second"]);
}

#[tokio::test]
async fn sequential_appends_are_neither_lost_nor_duplicated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = Logger::new(&path).unwrap();

    for i in 0..25 {
        let level = LogLevel::ALL[i % LogLevel::ALL.len()];
        logger.append(format!("message {i}"), level, Some(json!(i))).await;
    }

    let entries = read_entries(&path).await.unwrap();
    assert_eq!(entries.len(), 25);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.message, format!("message {i}"));
        assert_eq!(entry.level, LogLevel::ALL[i % LogLevel::ALL.len()]);
        assert_eq!(entry.additional_data, Some(json!(i)));
    }
    assert!(entries.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[tokio::test]
async fn messages_and_extra_values_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = Logger::new(&path).unwrap();

    let cases = vec![
        ("", json!(null)),
        ("quotes \" and \\ backslashes", json!("plain string")),
        ("multi\nline\ttext", json!(true)),
        ("unicode: żółw 🐢", json!(-12.5)),
        ("nested", json!({"ErrorCode": 123, "Details": ["a", {"b": null}]})),
    ];
    for (message, extra) in &cases {
        logger
            .append(*message, LogLevel::Warning, Some(extra.clone()))
            .await;
    }

    let entries = read_entries(&path).await.unwrap();
    assert_eq!(entries.len(), cases.len());
    for (entry, (message, extra)) in entries.iter().zip(&cases) {
        assert_eq!(entry.message, *message);
        assert_eq!(entry.level, LogLevel::Warning);
        match extra {
            serde_json::Value::Null => assert_eq!(entry.additional_data, None),
            other => assert_eq!(entry.additional_data.as_ref(), Some(other)),
        }
    }
}

#[tokio::test]
async fn compact_format_writes_one_line_per_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.jsonl");
    let options = LoggerOptions::default().with_format(RecordFormat::Compact);
    let logger = Logger::with_options(&path, options).unwrap();

    logger.info("one", Some(json!({"a": 1, "b": [1, 2]}))).await;
    logger.info("two", None).await;

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.get("Timestamp").is_some());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_appends_produce_whole_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = Logger::new(&path).unwrap();

    let tasks = (0..64).map(|i| {
        let logger = logger.clone();
        tokio::spawn(async move {
            let payload = json!({"task": i, "padding": "x".repeat(2048)});
            logger.info(format!("task {i}"), Some(payload)).await;
        })
    });
    for result in join_all(tasks).await {
        result.unwrap();
    }

    let entries = read_entries(&path).await.unwrap();
    assert_eq!(entries.len(), 64);
    let seen: BTreeSet<_> = entries.iter().map(|e| e.message.clone()).collect();
    let expected: BTreeSet<_> = (0..64).map(|i| format!("task {i}")).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn write_failure_is_reported_and_swallowed() {
    let buffer = DiagnosticBuffer::new(16);
    let subscriber = tracing_subscriber::registry().with(DiagnosticCollector::new(buffer.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    let path = logs.join("app.log");
    let logger = Logger::new(&path).unwrap();

    fs::remove_dir_all(&logs).unwrap();
    logger.error("lost", Some(json!({"code": 1}))).await;
    logger.info("also lost", None).await;

    assert!(!path.exists());
    let failures: Vec<_> = buffer
        .snapshot()
        .into_iter()
        .filter(|d| d.target == TARGET)
        .collect();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].level, tracing::Level::ERROR);
    assert_eq!(failures[0].message, "Failed to log message");
    assert_eq!(failures[0].field("path"), Some(path.display().to_string().as_str()));
    assert!(failures[0].field("error").is_some());
}

#[tokio::test]
async fn write_failure_without_subscriber_still_returns() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    let logger = Logger::new(logs.join("app.log")).unwrap();

    fs::remove_dir_all(&logs).unwrap();
    logger.warn("goes to stderr", None).await;
}

#[tokio::test]
async fn missing_file_is_recreated_on_append() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = Logger::new(&path).unwrap();

    fs::remove_file(&path).unwrap();
    logger.info("back again", None).await;

    let entries = read_entries(&path).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "back again");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn unserialized_logger_still_writes_every_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.log");
    let options = LoggerOptions::default()
        .with_format(RecordFormat::Compact)
        .with_serialized_writes(false);
    let logger = Logger::with_options(&path, options).unwrap();
    assert!(!logger.options().serialize_writes);

    logger.info("first", None).await;
    logger.info("second", None).await;

    let tasks = (0..16).map(|i| {
        let logger = logger.clone();
        tokio::spawn(async move { logger.warn(format!("task {i}"), Some(json!({"task": i}))).await })
    });
    for result in join_all(tasks).await {
        result.unwrap();
    }

    let entries = read_entries(&path).await.unwrap();
    assert_eq!(entries.len(), 18);
    assert_eq!(entries[0].message, "first");
    assert_eq!(entries[1].message, "second");
    let seen: BTreeSet<_> = entries[2..].iter().map(|e| e.message.clone()).collect();
    let expected: BTreeSet<_> = (0..16).map(|i| format!("task {i}")).collect();
    assert_eq!(seen, expected);
}
