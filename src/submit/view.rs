use std::collections::{BTreeSet, HashMap};

use log::{debug, info};
use serde::Serialize;

use crate::form::form_model::FieldName;
use crate::submit::outcome::OutcomeStatus;

// ============================================================================
// View boundary — where form state meets whatever renders it
// ============================================================================

/// Everything the controller needs from the page rendering the form.
pub trait FormView {
    /// Reflect a field value back onto its input.
    fn show_value(&mut self, field: FieldName, value: &str);

    /// Flag or unflag an input as invalid.
    fn mark_field(&mut self, field: FieldName, invalid: bool);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn set_result_status(&mut self, status: OutcomeStatus);

    fn replace_result_text(&mut self, text: &str);

    fn append_result_text(&mut self, text: &str);
}

/// The result containers: a status and the message lines under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultPanel {
    pub status: Option<OutcomeStatus>,
    pub lines: Vec<String>,
}

impl ResultPanel {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// A single view mutation, in the order the controller made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ViewEvent {
    ShowValue { field: FieldName, value: String },
    MarkField { field: FieldName, invalid: bool },
    SubmitEnabled(bool),
    ResultStatus(OutcomeStatus),
    ReplaceText(String),
    AppendText(String),
}

/// In-memory view that keeps the rendered state and the full event history.
#[derive(Debug, Clone)]
pub struct RecordingView {
    pub values: HashMap<FieldName, String>,
    pub invalid: BTreeSet<FieldName>,
    pub submit_enabled: bool,
    pub panel: ResultPanel,
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            invalid: BTreeSet::new(),
            submit_enabled: true,
            panel: ResultPanel::default(),
            events: Vec::new(),
        }
    }

    pub fn value(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn is_marked(&self, field: FieldName) -> bool {
        self.invalid.contains(&field)
    }

    /// Every submit-control toggle seen so far, oldest first.
    pub fn submit_toggles(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::SubmitEnabled(enabled) => Some(*enabled),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl FormView for RecordingView {
    fn show_value(&mut self, field: FieldName, value: &str) {
        self.values.insert(field, value.to_string());
        self.events.push(ViewEvent::ShowValue {
            field,
            value: value.to_string(),
        });
    }

    fn mark_field(&mut self, field: FieldName, invalid: bool) {
        if invalid {
            self.invalid.insert(field);
        } else {
            self.invalid.remove(&field);
        }
        self.events.push(ViewEvent::MarkField { field, invalid });
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
        self.events.push(ViewEvent::SubmitEnabled(enabled));
    }

    fn set_result_status(&mut self, status: OutcomeStatus) {
        self.panel.status = Some(status);
        self.events.push(ViewEvent::ResultStatus(status));
    }

    fn replace_result_text(&mut self, text: &str) {
        self.panel.lines = vec![text.to_string()];
        self.events.push(ViewEvent::ReplaceText(text.to_string()));
    }

    fn append_result_text(&mut self, text: &str) {
        self.panel.lines.push(text.to_string());
        self.events.push(ViewEvent::AppendText(text.to_string()));
    }
}

/// Terminal rendering: result text goes to stdout, the rest to the log.
#[derive(Debug, Default)]
pub struct ConsoleView {
    inner: RecordingView,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> &RecordingView {
        &self.inner
    }
}

impl FormView for ConsoleView {
    fn show_value(&mut self, field: FieldName, value: &str) {
        debug!("{} = {:?}", field, value);
        self.inner.show_value(field, value);
    }

    fn mark_field(&mut self, field: FieldName, invalid: bool) {
        if invalid {
            info!("{} is invalid", field);
        }
        self.inner.mark_field(field, invalid);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        debug!("submit {}", if enabled { "enabled" } else { "disabled" });
        self.inner.set_submit_enabled(enabled);
    }

    fn set_result_status(&mut self, status: OutcomeStatus) {
        debug!("result status: {}", status);
        self.inner.set_result_status(status);
    }

    fn replace_result_text(&mut self, text: &str) {
        println!("{}", text);
        self.inner.replace_result_text(text);
    }

    fn append_result_text(&mut self, text: &str) {
        println!("{}", text);
        self.inner.append_result_text(text);
    }
}
