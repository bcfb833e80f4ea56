use form_submit::form::form_model::FieldName;
use form_submit::submit::controller::SubmitPhase;
use form_submit::submit::outcome::ResponseOutcome;
use form_submit::trace::logger::TraceLogger;
use form_submit::trace::trace::TraceEvent;

#[test]
fn event_builders_fill_fields() {
    let event = TraceEvent::now(2, SubmitPhase::Submitting, "abc")
        .with_decision("answered")
        .with_outcome(&ResponseOutcome::Progress { timeout_ms: 750 });

    assert_eq!(event.attempt, 2);
    assert_eq!(event.phase, "Submitting");
    assert_eq!(event.fingerprint, "abc");
    assert_eq!(event.decision.as_deref(), Some("answered"));
    assert_eq!(event.outcome.as_deref(), Some("progress"));
    assert_eq!(event.retry_in_ms, Some(750));
    assert!(event.timestamp_ms > 0);
}

#[test]
fn terminal_outcome_has_no_retry() {
    let event = TraceEvent::now(1, SubmitPhase::Submitting, "abc").with_outcome(&ResponseOutcome::Error {
        reason: "busy".into(),
    });
    assert_eq!(event.outcome.as_deref(), Some("error"));
    assert_eq!(event.retry_in_ms, None);
}

#[test]
fn error_fields_use_field_names() {
    let event = TraceEvent::now(0, SubmitPhase::Idle, "abc")
        .with_error_fields(&[FieldName::Email, FieldName::Phone]);
    assert_eq!(event.error_fields, vec!["email", "phone"]);
}

#[test]
fn logger_appends_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.jsonl");
    let logger = TraceLogger::new(path.to_str().unwrap());

    logger.log(&TraceEvent::now(1, SubmitPhase::Submitting, "a").with_decision("answered"));
    logger.log(&TraceEvent::now(1, SubmitPhase::Idle, "a").with_decision("cancelled"));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["decision"], "cancelled");
    assert_eq!(lines[1]["phase"], "Idle");
}

#[test]
fn disabled_logger_writes_nothing() {
    let logger = TraceLogger::disabled();
    assert!(!logger.is_enabled());
    logger.log(&TraceEvent::now(1, SubmitPhase::Idle, "a"));
}

#[test]
fn unopenable_path_disables_logger() {
    let logger = TraceLogger::new("/nonexistent/dir/trace.jsonl");
    assert!(!logger.is_enabled());
}
