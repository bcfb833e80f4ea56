use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::sleep;

use crate::{
    form::{
        form_model::{FieldName, FormPatch, FormState, ValidationResult},
        validation::validate_form,
    },
    phone::formatter::PhoneFormatter,
    submit::{
        outcome::{OutcomeStatus, ResponseKey, ResponseOutcome, SUCCESS_MESSAGE},
        responder::Responder,
        view::FormView,
    },
    trace::{logger::TraceLogger, trace::TraceEvent},
};

pub const ATTEMPT_FAILED_TEXT: &str = "Attempt did not go through...";
pub const SENDING_AGAIN_TEXT: &str = "Sending again...";

pub fn retry_notice(timeout_ms: u64) -> String {
    format!("Retrying in {}ms...", timeout_ms)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmitPhase {
    Idle,
    Submitting,
}

/// How a call to [`SubmissionController::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SubmitReport {
    /// Validation failed; the responder was never called
    Rejected { validation: ValidationResult },

    Completed { attempts: u32, fingerprint: String },

    Failed {
        attempts: u32,
        reason: String,
        fingerprint: String,
    },

    /// Interrupted through a [`CancelHandle`] while waiting
    Cancelled { attempts: u32, fingerprint: String },
}

/// Payload-free kind of a [`SubmitReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitKind {
    Rejected,
    Completed,
    Failed,
    Cancelled,
}

impl SubmitReport {
    pub fn kind(&self) -> SubmitKind {
        match self {
            SubmitReport::Rejected { .. } => SubmitKind::Rejected,
            SubmitReport::Completed { .. } => SubmitKind::Completed,
            SubmitReport::Failed { .. } => SubmitKind::Failed,
            SubmitReport::Cancelled { .. } => SubmitKind::Cancelled,
        }
    }

    /// Responder calls made, counting the interrupted one.
    pub fn attempts(&self) -> u32 {
        match self {
            SubmitReport::Rejected { .. } => 0,
            SubmitReport::Completed { attempts, .. }
            | SubmitReport::Failed { attempts, .. }
            | SubmitReport::Cancelled { attempts, .. } => *attempts,
        }
    }
}

/// Stops the in-flight submission of the controller it came from.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Owns the form data and drives submissions against a responder.
///
/// `submit` holds the controller mutably for its whole run, so field updates
/// and a second submission cannot interleave with one in flight. Dropping the
/// `submit` future drops its pending timers and returns the controller to
/// Idle with the submit control enabled.
pub struct SubmissionController<V: FormView> {
    state: FormState,
    phase: SubmitPhase,
    action: ResponseKey,
    responder: Arc<dyn Responder>,
    view: V,
    tracer: Arc<TraceLogger>,
    cancel: Arc<watch::Sender<bool>>,
}

impl<V: FormView> SubmissionController<V> {
    pub fn new(responder: Arc<dyn Responder>, view: V, action: ResponseKey) -> Self {
        let (cancel, _) = watch::channel(false);
        Self {
            state: FormState::new(),
            phase: SubmitPhase::Idle,
            action,
            responder,
            view,
            tracer: Arc::new(TraceLogger::disabled()),
            cancel: Arc::new(cancel),
        }
    }

    pub fn with_tracer(mut self, tracer: Arc<TraceLogger>) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn action(&self) -> ResponseKey {
        self.action
    }

    pub fn set_action(&mut self, action: ResponseKey) {
        self.action = action;
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: Arc::clone(&self.cancel),
        }
    }

    /// Merge `patch` into the form, reformat the phone and push all three
    /// values back to the view.
    pub fn set_data(&mut self, patch: &FormPatch) {
        self.state.merge(patch);
        self.state.phone = PhoneFormatter::output_view(&self.state.phone);

        for field in FieldName::ALL {
            self.view.show_value(field, self.state.get(field));
        }
    }

    pub fn validate(&self) -> ValidationResult {
        validate_form(&self.state)
    }

    /// Validate, then submit until the responder answers Success or Error.
    ///
    /// Progress answers are retried after their timeout, without limit. Only
    /// a [`CancelHandle`] (or dropping this future) ends such a loop.
    pub async fn submit(&mut self) -> SubmitReport {
        let validation = self.validate();
        for field in FieldName::ALL {
            self.view.mark_field(field, !validation.is_field_valid(field));
        }

        let fingerprint = self.state.fingerprint();

        if !validation.is_valid {
            info!("submission rejected, invalid fields: {:?}", validation.error_fields);
            self.tracer.log(
                &TraceEvent::now(0, self.phase, &fingerprint)
                    .with_decision("rejected")
                    .with_error_fields(validation.error_fields.as_slice()),
            );
            return SubmitReport::Rejected { validation };
        }

        self.phase = SubmitPhase::Submitting;
        self.view.set_submit_enabled(false);

        let mut guard = SubmittingGuard(self);
        guard.0.attempt_until_terminal(fingerprint).await
    }

    async fn attempt_until_terminal(&mut self, fingerprint: String) -> SubmitReport {
        self.cancel.send_replace(false);
        let mut cancel = self.cancel.subscribe();

        let responder = Arc::clone(&self.responder);
        let action = self.action;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!("submission {} attempt {} ('{}')", &fingerprint[..8], attempt, action);

            let answer = tokio::select! {
                outcome = responder.call(action) => Some(outcome),
                _ = cancelled(&mut cancel) => None,
            };

            let Some(outcome) = answer else {
                return self.finish_cancelled(attempt, fingerprint);
            };

            self.tracer.log(
                &TraceEvent::now(attempt, self.phase, &fingerprint)
                    .with_decision("answered")
                    .with_outcome(&outcome),
            );

            match outcome {
                ResponseOutcome::Success => {
                    self.finish(OutcomeStatus::Success);
                    self.view.replace_result_text(SUCCESS_MESSAGE);
                    info!("submission completed after {} attempt(s)", attempt);
                    return SubmitReport::Completed {
                        attempts: attempt,
                        fingerprint,
                    };
                }

                ResponseOutcome::Error { reason } => {
                    self.finish(OutcomeStatus::Error);
                    self.view.replace_result_text(&reason);
                    info!("submission failed after {} attempt(s): {}", attempt, reason);
                    return SubmitReport::Failed {
                        attempts: attempt,
                        reason,
                        fingerprint,
                    };
                }

                ResponseOutcome::Progress { timeout_ms } => {
                    self.view.append_result_text(ATTEMPT_FAILED_TEXT);
                    self.view.set_result_status(OutcomeStatus::Progress);
                    self.view.append_result_text(&retry_notice(timeout_ms));
                    debug!("retrying in {}ms", timeout_ms);

                    let waited = tokio::select! {
                        _ = sleep(Duration::from_millis(timeout_ms)) => true,
                        _ = cancelled(&mut cancel) => false,
                    };

                    if !waited {
                        return self.finish_cancelled(attempt, fingerprint);
                    }

                    self.view.append_result_text(SENDING_AGAIN_TEXT);
                }
            }
        }
    }

    /// Back to Idle with the submit control re-enabled.
    fn finish(&mut self, status: OutcomeStatus) {
        self.phase = SubmitPhase::Idle;
        self.view.set_submit_enabled(true);
        self.view.set_result_status(status);
    }

    fn finish_cancelled(&mut self, attempts: u32, fingerprint: String) -> SubmitReport {
        self.phase = SubmitPhase::Idle;
        self.view.set_submit_enabled(true);
        info!("submission cancelled during attempt {}", attempts);
        self.tracer.log(
            &TraceEvent::now(attempts, self.phase, &fingerprint).with_decision("cancelled"),
        );
        SubmitReport::Cancelled {
            attempts,
            fingerprint,
        }
    }
}

/// Puts a controller left mid-submission back to Idle. A submission that
/// ran to an outcome has already done so; this only acts when the `submit`
/// future is dropped while waiting.
struct SubmittingGuard<'a, V: FormView>(&'a mut SubmissionController<V>);

impl<V: FormView> Drop for SubmittingGuard<'_, V> {
    fn drop(&mut self) {
        if self.0.phase == SubmitPhase::Submitting {
            debug!("submission dropped mid-flight, re-enabling submit");
            self.0.phase = SubmitPhase::Idle;
            self.0.view.set_submit_enabled(true);
        }
    }
}

/// Resolves once cancellation is requested; never resolves otherwise.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}
