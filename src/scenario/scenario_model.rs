use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::form::form_model::FieldName;
use crate::submit::controller::SubmitKind;
use crate::submit::outcome::{OutcomeStatus, ResponseKey};

/// A recorded sequence of form events, replayed against a controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Human-readable name for this scenario
    pub name: String,

    /// Form action key; ignored when `responses` is set
    #[serde(default = "default_action")]
    pub action: ResponseKey,

    /// Answers to play back, the last one repeating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<ResponseKey>>,

    /// Responder delay override in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,

    /// Ordered list of events to replay
    pub steps: Vec<ScenarioStep>,
}

fn default_action() -> ResponseKey {
    ResponseKey::Success
}

/// A single step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// A keystroke in one input. Unknown field names are ignored.
    Input { field: String, value: String },

    /// Several inputs at once
    Fill { values: HashMap<String, String> },

    /// Press submit and wait for the submission to end, optionally
    /// cancelling it after `cancel_after_ms`
    Submit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cancel_after_ms: Option<u64>,
    },

    /// Check the rendered form
    Expect { checks: Vec<Check> },
}

/// A single check against the rendered form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Value shown in an input equals `expected`
    FieldValue { field: FieldName, expected: String },

    /// Input is (or is not) flagged invalid
    FieldMarked { field: FieldName, invalid: bool },

    SubmitEnabled { expected: bool },

    ResultStatus { expected: OutcomeStatus },

    ResultTextContains { expected: String },

    /// Responder calls made by the last submission
    Attempts { expected: u32 },

    /// How the last submission ended
    Submission { expected: SubmitKind },
}

/// Result of evaluating a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckResult {
    /// Which step this check belongs to (0-indexed)
    pub step_index: usize,

    pub check: Check,

    pub passed: bool,

    /// Actual value found (for debugging failed checks)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

/// Result of replaying a complete scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,

    /// Whether all checks passed
    pub passed: bool,

    pub steps_run: usize,

    /// Responder calls made across all submit steps
    pub total_attempts: u32,

    pub check_results: Vec<CheckResult>,
}
