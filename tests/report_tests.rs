use form_submit::report::console::format_console_report;
use form_submit::report::junit::{escape_xml, generate_junit_xml};
use form_submit::report::report_model::{ScenarioSuiteReport, failed_checks};
use form_submit::scenario::scenario_model::{Check, CheckResult, ScenarioResult};
use form_submit::submit::controller::SubmitKind;
use form_submit::submit::outcome::OutcomeStatus;

// ============================================================================
// Helper builders
// ============================================================================

fn passing_result(name: &str) -> ScenarioResult {
    ScenarioResult {
        scenario_name: name.to_string(),
        passed: true,
        steps_run: 5,
        total_attempts: 1,
        check_results: vec![CheckResult {
            step_index: 4,
            check: Check::Submission {
                expected: SubmitKind::Completed,
            },
            passed: true,
            actual: Some("Completed".into()),
            message: None,
        }],
    }
}

fn failing_result(name: &str) -> ScenarioResult {
    ScenarioResult {
        scenario_name: name.to_string(),
        passed: false,
        steps_run: 3,
        total_attempts: 3,
        check_results: vec![
            CheckResult {
                step_index: 2,
                check: Check::ResultStatus {
                    expected: OutcomeStatus::Success,
                },
                passed: false,
                actual: Some("error".into()),
                message: Some("Result status is not 'success'".into()),
            },
            CheckResult {
                step_index: 2,
                check: Check::Attempts { expected: 1 },
                passed: false,
                actual: Some("3".into()),
                message: Some("Submission made 3 attempt(s), expected 1".into()),
            },
        ],
    }
}

fn mixed_suite_report() -> ScenarioSuiteReport {
    ScenarioSuiteReport::from_results(
        "form",
        vec![
            passing_result("valid form submits"),
            failing_result("progress then error"),
            passing_result("invalid email"),
        ],
    )
}

// ============================================================================
// ScenarioSuiteReport
// ============================================================================

#[test]
fn suite_report_from_results_counts() {
    let report = mixed_suite_report();
    assert_eq!(report.suite_name, "form");
    assert_eq!(report.total, 3);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.total_attempts, 5);
    assert_eq!(report.duration_ms, None);
    assert!(!report.all_passed());
}

#[test]
fn failed_checks_skips_passing_ones() {
    let result = failing_result("f");
    let steps: Vec<usize> = failed_checks(&result).map(|cr| cr.step_index).collect();
    assert_eq!(steps, vec![2, 2]);
    assert_eq!(failed_checks(&passing_result("p")).count(), 0);
}

#[test]
fn suite_report_all_passed() {
    let report = ScenarioSuiteReport::from_results(
        "ok",
        vec![passing_result("a"), passing_result("b")],
    );
    assert!(report.all_passed());
}

#[test]
fn suite_report_empty() {
    let report = ScenarioSuiteReport::from_results("empty", vec![]);
    assert_eq!(report.total, 0);
    assert!(report.all_passed());
}

#[test]
fn suite_report_json_skips_missing_duration() {
    let json = serde_json::to_string(&mixed_suite_report()).unwrap();
    assert!(!json.contains("duration_ms"));

    let json = serde_json::to_string(&mixed_suite_report().with_duration(1500)).unwrap();
    assert!(json.contains("\"duration_ms\":1500"));
}

// ============================================================================
// Console reporter
// ============================================================================

#[test]
fn console_report_header_and_markers() {
    let out = format_console_report(&mixed_suite_report());
    assert!(out.starts_with("=== Scenarios: form ===\n"));
    assert!(out.contains("\u{2713} PASS  valid form submits (5 steps, 1 checks, 1 attempts)"));
    assert!(out.contains("\u{2717} FAIL  progress then error (3 steps, 2 checks, 3 attempts)"));
}

#[test]
fn console_report_failure_details() {
    let out = format_console_report(&mixed_suite_report());
    assert!(out.contains("    [FAIL] Step 2: ResultStatus — Result status is not 'success'"));
    assert!(out.contains("    [FAIL] Step 2: Attempts — Submission made 3 attempt(s), expected 1"));
}

#[test]
fn console_report_summary_line() {
    let out = format_console_report(&mixed_suite_report());
    assert!(out.ends_with("=== Results: 2 passed, 1 failed (3 total), 5 attempts ===\n"));

    let out = format_console_report(&mixed_suite_report().with_duration(1500));
    assert!(out.contains("=== Results: 2 passed, 1 failed (3 total), 5 attempts in 1.5s ==="));
}

// ============================================================================
// JUnit reporter
// ============================================================================

#[test]
fn junit_xml_structure() {
    let xml = generate_junit_xml(&mixed_suite_report().with_duration(1500));
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(xml.contains("<testsuite name=\"form\" tests=\"3\" failures=\"1\" time=\"1.500\">"));
    assert!(xml.contains("<testcase name=\"valid form submits\" classname=\"form-submit\" assertions=\"1\" />"));
    assert!(xml.trim_end().ends_with("</testsuite>"));
}

#[test]
fn junit_xml_failure_element() {
    let xml = generate_junit_xml(&mixed_suite_report());
    assert!(xml.contains(
        "<testcase name=\"progress then error\" classname=\"form-submit\" assertions=\"2\">"
    ));
    assert!(xml.contains("<failure message=\"2 check(s) failed\" type=\"CheckFailure\">"));
    assert!(xml.contains("Step 2: Result status is not &apos;success&apos;"));
    assert!(!xml.contains("time="));
}

#[test]
fn junit_escapes_scenario_names() {
    let report = ScenarioSuiteReport::from_results("a<b", vec![passing_result("\"quoted\" & more")]);
    let xml = generate_junit_xml(&report);
    assert!(xml.contains("name=\"a&lt;b\""));
    assert!(xml.contains("name=\"&quot;quoted&quot; &amp; more\""));
}

#[test]
fn escape_xml_all_special_characters() {
    assert_eq!(escape_xml("<a href='x'>&\"</a>"), "&lt;a href=&apos;x&apos;&gt;&amp;&quot;&lt;/a&gt;");
    assert_eq!(escape_xml("plain"), "plain");
}
