use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::submit::{controller::SubmitPhase, outcome::ResponseOutcome};

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub attempt: u32,

    pub phase: String,
    pub fingerprint: String,

    pub decision: Option<String>,
    pub outcome: Option<String>,

    pub retry_in_ms: Option<u64>,
    pub error_fields: Vec<String>,
}

impl TraceEvent {
    pub fn now(attempt: u32, phase: SubmitPhase, fingerprint: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            attempt,
            phase: format!("{:?}", phase),
            fingerprint: fingerprint.to_string(),
            decision: None,
            outcome: None,
            retry_in_ms: None,
            error_fields: vec![],
        }
    }

    pub fn with_decision(mut self, decision: impl ToString) -> Self {
        self.decision = Some(decision.to_string());
        self
    }

    pub fn with_outcome(mut self, outcome: &ResponseOutcome) -> Self {
        self.outcome = Some(outcome.status().to_string());
        if let ResponseOutcome::Progress { timeout_ms } = outcome {
            self.retry_in_ms = Some(*timeout_ms);
        }
        self
    }

    pub fn with_error_fields(mut self, fields: &[impl ToString]) -> Self {
        self.error_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }
}
