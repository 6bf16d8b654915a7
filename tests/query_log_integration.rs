//! Query logger integration tests
//!
//! End-to-end tests driving `QueryLogger` through the hook registry the way
//! an ORM adapter would. Covers classification, suppression, templates,
//! JSON configuration, and concurrent use.

use a3s_query_log::{
    Level, MemorySink, QueryContext, QueryError, QueryEvent, QueryHooks, QueryKind,
    QueryLogConfig, QueryLogError, QueryLogger,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn logger_with_sink(config: QueryLogConfig) -> (Arc<QueryLogger>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = QueryLogger::new(config, sink.clone()).unwrap();
    (Arc::new(logger), sink)
}

fn started_ago(query: &str, ago: Duration) -> QueryEvent {
    QueryEvent::new(query).started_at(Instant::now().checked_sub(ago).unwrap())
}

// ─── Hook Registry ───────────────────────────────────────────────

#[test]
fn test_hook_registry_roundtrip() {
    let (logger, sink) = logger_with_sink(QueryLogConfig::default().with_query_level(Level::Info));
    let mut hooks = QueryHooks::new();
    hooks.add_shared(logger);

    let event = QueryEvent::new("SELECT id FROM users").with_kind(QueryKind::Select);
    let ctx = hooks.before_query(QueryContext::new().with_metadata("request_id", "r-7"), &event);
    assert_eq!(ctx.metadata["request_id"], "r-7");

    hooks.after_query(&ctx, &event).unwrap();

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Info);
    assert!(records[0].message.starts_with("SELECT["));
    assert!(records[0].message.ends_with("]: SELECT id FROM users"));
}

#[test]
fn test_hook_registry_propagates_render_failure() {
    let (logger, sink) =
        logger_with_sink(QueryLogConfig::default().with_message_template("{{ table }}"));
    let mut hooks = QueryHooks::new();
    hooks.add_shared(logger);

    let event = QueryEvent::new("SELECT 1");
    let err = hooks.after_query(&QueryContext::new(), &event).unwrap_err();
    assert!(matches!(err, QueryLogError::Template(_)));
    assert!(sink.is_empty());
}

// ─── Classification ──────────────────────────────────────────────

#[test]
fn test_mixed_traffic_levels() {
    let config = QueryLogConfig::default()
        .with_slow_threshold(Duration::from_millis(50))
        .with_query_level(Level::Debug)
        .with_slow_level(Level::Warn)
        .with_error_level(Level::Error);
    let (logger, sink) = logger_with_sink(config);

    logger.after_query(&QueryEvent::new("SELECT 1")).unwrap();
    logger
        .after_query(&started_ago("SELECT pg_sleep(0.1)", Duration::from_millis(80)))
        .unwrap();
    logger
        .after_query(&QueryEvent::new("SELECT * FROM t WHERE id = 9").with_error(QueryError::NoRows))
        .unwrap();
    logger
        .after_query(
            &QueryEvent::new("UPDATE t SET x = 1")
                .with_kind(QueryKind::Update)
                .with_error(QueryError::failed("could not serialize access")),
        )
        .unwrap();

    let levels: Vec<Level> = sink.records().iter().map(|r| r.level).collect();
    assert_eq!(levels, vec![Level::Debug, Level::Warn, Level::Debug, Level::Error]);
    assert!(sink.records()[3]
        .message
        .ends_with("]: UPDATE t SET x = 1: could not serialize access"));
}

#[test]
fn test_suppress_successful_queries_only() {
    let config = QueryLogConfig::default()
        .with_query_level(Level::Disabled)
        .with_error_level(Level::Warn);
    let (logger, sink) = logger_with_sink(config);

    for i in 0..10 {
        logger
            .after_query(&QueryEvent::new(format!("SELECT {}", i)))
            .unwrap();
    }
    assert!(sink.is_empty());

    logger
        .after_query(&QueryEvent::new("DROP TABLE t").with_kind(QueryKind::DropTable).with_error(
            QueryError::failed("table does not exist"),
        ))
        .unwrap();

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Warn);
    assert!(records[0].message.starts_with("DROP TABLE["));
}

// ─── Configuration ───────────────────────────────────────────────

#[test]
fn test_config_from_json() {
    let config: QueryLogConfig = serde_json::from_str(
        r#"{
            "slowThresholdMs": 20,
            "queryLevel": "info",
            "slowLevel": "error",
            "errorLevel": "fatal",
            "messageTemplate": "{{ operation }} {{ duration_ms }}ms",
            "errorTemplate": "{{ operation }} failed: {{ error }}"
        }"#,
    )
    .unwrap();
    let (logger, sink) = logger_with_sink(config);

    logger
        .after_query(&started_ago("DELETE FROM sessions", Duration::from_millis(30)))
        .unwrap();
    logger
        .after_query(&QueryEvent::new("INSERT INTO t VALUES (1)").with_error(QueryError::failed("boom")))
        .unwrap();

    let records = sink.records();
    assert_eq!(records[0].level, Level::Error);
    assert!(records[0].message.starts_with("DELETE "));
    assert_eq!(records[1].level, Level::Fatal);
    assert_eq!(records[1].message, "INSERT failed: boom");
}

#[test]
fn test_invalid_template_fails_before_any_event() {
    let config = QueryLogConfig::default().with_error_template("{{ error ");
    let err = QueryLogger::new(config, MemorySink::new()).unwrap_err();
    assert!(matches!(err, QueryLogError::Template(_)));
}

#[test]
fn test_unknown_level_in_json_is_rejected() {
    let result = serde_json::from_str::<QueryLogConfig>(r#"{"slowLevel": "critical"}"#);
    assert!(result.is_err());
}

// ─── Concurrency ─────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_after_query() {
    let (logger, sink) = logger_with_sink(
        QueryLogConfig::default().with_message_template("{{ operation }}|{{ query }}"),
    );

    let mut handles = Vec::new();
    for i in 0..64 {
        let logger = logger.clone();
        handles.push(tokio::spawn(async move {
            let event = QueryEvent::new(format!("SELECT {} FROM worker_{}", i, i))
                .with_kind(QueryKind::Select);
            logger.after_query(&event).unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let records = sink.records();
    assert_eq!(records.len(), 64);

    let messages: HashSet<String> = records.into_iter().map(|r| r.message).collect();
    assert_eq!(messages.len(), 64);
    for i in 0..64 {
        assert!(messages.contains(&format!("SELECT|SELECT {} FROM worker_{}", i, i)));
    }
}

#[test]
fn test_concurrent_threads_share_logger() {
    let (logger, sink) = logger_with_sink(QueryLogConfig::default());

    std::thread::scope(|s| {
        for t in 0..8 {
            let logger = &logger;
            s.spawn(move || {
                for n in 0..25 {
                    let event = QueryEvent::new(format!("UPDATE t{} SET n = {}", t, n));
                    logger.after_query(&event).unwrap();
                }
            });
        }
    });

    let records = sink.records();
    assert_eq!(records.len(), 200);
    for record in &records {
        let (prefix, query) = record.message.split_once("]: ").unwrap();
        assert!(prefix.starts_with("UPDATE["));
        assert!(query.starts_with("UPDATE t"));
    }
}
