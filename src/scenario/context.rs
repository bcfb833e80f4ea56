use crate::scenario::scenario_model::CheckResult;
use crate::submit::controller::SubmitReport;

/// Tracks the execution state and results of a running scenario.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    /// All check results collected during execution
    pub check_results: Vec<CheckResult>,

    /// Report of the most recent submit step
    pub last_submission: Option<SubmitReport>,

    /// Responder calls across all submit steps
    pub total_attempts: u32,
}

impl ScenarioContext {
    pub fn new() -> Self {
        ScenarioContext {
            check_results: Vec::new(),
            last_submission: None,
            total_attempts: 0,
        }
    }

    pub fn record_checks(&mut self, results: Vec<CheckResult>) {
        self.check_results.extend(results);
    }

    pub fn record_submission(&mut self, report: SubmitReport) {
        self.total_attempts += report.attempts();
        self.last_submission = Some(report);
    }

    pub fn all_passed(&self) -> bool {
        self.check_results.iter().all(|r| r.passed)
    }
}

impl Default for ScenarioContext {
    fn default() -> Self {
        Self::new()
    }
}
