use serde::{Deserialize, Serialize};

use crate::scenario::scenario_model::{CheckResult, ScenarioResult};

/// Outcome of replaying a batch of scenarios, shared by the console and
/// JUnit renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSuiteReport {
    /// Scenario file or directory the batch was loaded from
    pub suite_name: String,

    pub total: usize,
    pub passed: usize,
    pub failed: usize,

    /// Responder calls summed over every scenario
    pub total_attempts: u32,

    /// Wall-clock time of the whole batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub results: Vec<ScenarioResult>,
}

impl ScenarioSuiteReport {
    pub fn from_results(suite_name: &str, results: Vec<ScenarioResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            suite_name: suite_name.to_string(),
            total: results.len(),
            passed,
            failed: results.len() - passed,
            total_attempts: results.iter().map(|r| r.total_attempts).sum(),
            duration_ms: None,
            results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Failed checks of one scenario, in the order they ran.
pub fn failed_checks(result: &ScenarioResult) -> impl Iterator<Item = &CheckResult> {
    result.check_results.iter().filter(|cr| !cr.passed)
}
