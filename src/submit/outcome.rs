use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::form::error::FormError;

pub const DEFAULT_PROGRESS_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_ERROR_REASON: &str = "Failed to submit the form. Please try again";
pub const SUCCESS_MESSAGE: &str = "Success!";

/// Selects which canned outcome the responder answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKey {
    Success,
    Error,
    Progress,
}

impl ResponseKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKey::Success => "success",
            ResponseKey::Error => "error",
            ResponseKey::Progress => "progress",
        }
    }
}

impl fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseKey {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "success" => Ok(ResponseKey::Success),
            "error" => Ok(ResponseKey::Error),
            "progress" => Ok(ResponseKey::Progress),
            other => Err(FormError::UnknownResponseKey(other.to_string())),
        }
    }
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseOutcome {
    Success,
    Error { reason: String },
    Progress { timeout_ms: u64 },
}

impl ResponseOutcome {
    pub fn status(&self) -> OutcomeStatus {
        match self {
            ResponseOutcome::Success => OutcomeStatus::Success,
            ResponseOutcome::Error { .. } => OutcomeStatus::Error,
            ResponseOutcome::Progress { .. } => OutcomeStatus::Progress,
        }
    }
}

/// Payload-free outcome tag, shown as the result container's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Error,
    Progress,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::Error => "error",
            OutcomeStatus::Progress => "progress",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canned payloads used to turn a [`ResponseKey`] into a [`ResponseOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTemplates {
    pub error_reason: String,
    pub progress_timeout_ms: u64,
}

impl Default for OutcomeTemplates {
    fn default() -> Self {
        Self {
            error_reason: DEFAULT_ERROR_REASON.to_string(),
            progress_timeout_ms: DEFAULT_PROGRESS_TIMEOUT_MS,
        }
    }
}

impl OutcomeTemplates {
    pub fn outcome_for(&self, key: ResponseKey) -> ResponseOutcome {
        match key {
            ResponseKey::Success => ResponseOutcome::Success,
            ResponseKey::Error => ResponseOutcome::Error {
                reason: self.error_reason.clone(),
            },
            ResponseKey::Progress => ResponseOutcome::Progress {
                timeout_ms: self.progress_timeout_ms,
            },
        }
    }
}
