use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::time::sleep;

use crate::form::form_model::FormPatch;
use crate::scenario::context::ScenarioContext;
use crate::scenario::scenario_model::{Check, CheckResult, Scenario, ScenarioResult, ScenarioStep};
use crate::submit::controller::{SubmissionController, SubmitReport};
use crate::submit::outcome::OutcomeTemplates;
use crate::submit::responder::{MockResponder, Responder, ScriptedResponder};
use crate::submit::view::RecordingView;

/// Replays a Scenario step-by-step against a fresh controller.
pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Run a complete scenario. `delay` is the responder delay unless the
    /// scenario overrides it.
    pub async fn run(scenario: &Scenario, delay: Duration, templates: &OutcomeTemplates) -> ScenarioResult {
        let mut ctx = ScenarioContext::new();
        let delay = scenario.delay_ms.map(Duration::from_millis).unwrap_or(delay);
        let mut controller = SubmissionController::new(
            Self::build_responder(scenario, delay, templates),
            RecordingView::new(),
            scenario.action,
        );

        for (i, step) in scenario.steps.iter().enumerate() {
            Self::execute_step(step, i, &mut controller, &mut ctx).await;
        }

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            passed: ctx.all_passed(),
            steps_run: scenario.steps.len(),
            total_attempts: ctx.total_attempts,
            check_results: ctx.check_results,
        }
    }

    fn build_responder(scenario: &Scenario, delay: Duration, templates: &OutcomeTemplates) -> Arc<dyn Responder> {
        match &scenario.responses {
            Some(keys) => Arc::new(ScriptedResponder::from_keys(delay, keys, templates)),
            None => Arc::new(MockResponder::new(delay, templates.clone())),
        }
    }

    async fn execute_step(
        step: &ScenarioStep,
        step_index: usize,
        controller: &mut SubmissionController<RecordingView>,
        ctx: &mut ScenarioContext,
    ) {
        match step {
            ScenarioStep::Input { field, value } => {
                controller.set_data(&FormPatch::from_pairs([(field.as_str(), value.as_str())]));
            }

            ScenarioStep::Fill { values } => {
                controller.set_data(&FormPatch::from_map(values));
            }

            ScenarioStep::Submit { cancel_after_ms } => {
                let report = Self::submit(controller, *cancel_after_ms).await;
                debug!("step {}: submission ended as {:?}", step_index, report.kind());
                ctx.record_submission(report);
            }

            ScenarioStep::Expect { checks } => {
                let results = checks
                    .iter()
                    .map(|check| Self::evaluate_one(check, step_index, controller.view(), &*ctx))
                    .collect();
                ctx.record_checks(results);
            }
        }
    }

    async fn submit(
        controller: &mut SubmissionController<RecordingView>,
        cancel_after_ms: Option<u64>,
    ) -> SubmitReport {
        let Some(ms) = cancel_after_ms else {
            return controller.submit().await;
        };

        let handle = controller.cancel_handle();
        let submission = controller.submit();
        tokio::pin!(submission);

        tokio::select! {
            report = &mut submission => report,
            _ = sleep(Duration::from_millis(ms)) => {
                handle.cancel();
                submission.await
            }
        }
    }

    /// Evaluate a single check.
    fn evaluate_one(
        check: &Check,
        step_index: usize,
        view: &RecordingView,
        ctx: &ScenarioContext,
    ) -> CheckResult {
        let (passed, actual, message) = match check {
            Check::FieldValue { field, expected } => {
                let actual = view.value(*field);
                let passed = actual == expected.as_str();
                (
                    passed,
                    Some(actual.to_string()),
                    format!("Field '{}' shows '{}' instead of '{}'", field, actual, expected),
                )
            }

            Check::FieldMarked { field, invalid } => {
                let actual = view.is_marked(*field);
                (
                    actual == *invalid,
                    Some(actual.to_string()),
                    format!(
                        "Field '{}' is {}marked invalid",
                        field,
                        if actual { "" } else { "not " }
                    ),
                )
            }

            Check::SubmitEnabled { expected } => {
                let actual = view.submit_enabled;
                (
                    actual == *expected,
                    Some(actual.to_string()),
                    format!(
                        "Submit is {}",
                        if actual { "enabled" } else { "disabled" }
                    ),
                )
            }

            Check::ResultStatus { expected } => {
                let actual = view.panel.status;
                (
                    actual == Some(*expected),
                    actual.map(|s| s.to_string()),
                    format!("Result status is not '{}'", expected),
                )
            }

            Check::ResultTextContains { expected } => {
                let text = view.panel.text();
                (
                    text.contains(expected.as_str()),
                    Some(text),
                    format!("Result text does not contain '{}'", expected),
                )
            }

            Check::Attempts { expected } => match &ctx.last_submission {
                Some(report) => (
                    report.attempts() == *expected,
                    Some(report.attempts().to_string()),
                    format!("Submission made {} attempt(s), expected {}", report.attempts(), expected),
                ),
                None => (false, None, "No submission has run yet".to_string()),
            },

            Check::Submission { expected } => match &ctx.last_submission {
                Some(report) => (
                    report.kind() == *expected,
                    Some(format!("{:?}", report.kind())),
                    format!("Submission ended as {:?}, expected {:?}", report.kind(), expected),
                ),
                None => (false, None, "No submission has run yet".to_string()),
            },
        };

        CheckResult {
            step_index,
            check: check.clone(),
            passed,
            actual,
            message: if passed { None } else { Some(message) },
        }
    }
}
