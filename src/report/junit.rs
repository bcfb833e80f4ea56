use crate::report::report_model::{ScenarioSuiteReport, failed_checks};
use crate::scenario::scenario_model::ScenarioResult;

const CLASSNAME: &str = "form-submit";

// ============================================================================
// JUnit XML reporter
// ============================================================================

/// Render the suite as JUnit XML, one `<testcase>` per scenario.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuite name="scenarios" tests="2" failures="1" time="1.500">
///   <testcase name="valid form submits" classname="form-submit" assertions="5" />
///   <testcase name="progress then error" classname="form-submit" assertions="2">
///     <failure message="1 check(s) failed" type="CheckFailure">Step 4: Result status is not 'success'</failure>
///   </testcase>
/// </testsuite>
/// ```
pub fn generate_junit_xml(report: &ScenarioSuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let cases: String = report.results.iter().map(testcase).collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        time = time_attr,
        cases = cases,
    )
}

fn testcase(result: &ScenarioResult) -> String {
    let open = format!(
        "  <testcase name=\"{}\" classname=\"{}\" assertions=\"{}\"",
        escape_xml(&result.scenario_name),
        CLASSNAME,
        result.check_results.len()
    );

    let failures: Vec<String> = failed_checks(result)
        .map(|cr| {
            let msg = cr.message.as_deref().unwrap_or("check failed");
            format!("Step {}: {}", cr.step_index, msg)
        })
        .collect();

    if failures.is_empty() {
        return format!("{} />\n", open);
    }

    format!(
        "{open}>\n    <failure message=\"{count} check(s) failed\" type=\"CheckFailure\">{body}</failure>\n  </testcase>\n",
        open = open,
        count = failures.len(),
        body = escape_xml(&failures.join("\n")),
    )
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
