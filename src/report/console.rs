use std::fmt::Write;

use crate::report::report_model::{ScenarioSuiteReport, failed_checks};
use crate::scenario::scenario_model::Check;

/// Format a scenario suite report for terminal output.
///
/// ```text
/// === Scenarios: scenarios ===
///
/// ✓ PASS  valid form submits (6 steps, 5 checks, 1 attempts)
/// ✗ FAIL  progress then error (3 steps, 2 checks, 3 attempts)
///     [FAIL] Step 2: ResultStatus — Result status is not 'success'
///
/// === Results: 1 passed, 1 failed (2 total), 4 attempts in 3.5s ===
/// ```
pub fn format_console_report(report: &ScenarioSuiteReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Scenarios: {} ===\n", report.suite_name);

    for result in &report.results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        let _ = writeln!(
            out,
            "{}  {} ({} steps, {} checks, {} attempts)",
            marker,
            result.scenario_name,
            result.steps_run,
            result.check_results.len(),
            result.total_attempts
        );

        for cr in failed_checks(result) {
            let _ = writeln!(
                out,
                "    [FAIL] Step {}: {} — {}",
                cr.step_index,
                check_name(&cr.check),
                cr.message.as_deref().unwrap_or("check failed")
            );
        }
    }

    let _ = write!(
        out,
        "\n=== Results: {} passed, {} failed ({} total), {} attempts",
        report.passed, report.failed, report.total, report.total_attempts
    );

    if let Some(ms) = report.duration_ms {
        let _ = write!(out, " in {:.1}s", ms as f64 / 1000.0);
    }

    out.push_str(" ===\n");
    out
}

fn check_name(check: &Check) -> &'static str {
    match check {
        Check::FieldValue { .. } => "FieldValue",
        Check::FieldMarked { .. } => "FieldMarked",
        Check::SubmitEnabled { .. } => "SubmitEnabled",
        Check::ResultStatus { .. } => "ResultStatus",
        Check::ResultTextContains { .. } => "ResultTextContains",
        Check::Attempts { .. } => "Attempts",
        Check::Submission { .. } => "Submission",
    }
}
