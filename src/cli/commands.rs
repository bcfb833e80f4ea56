use std::sync::Arc;

use crate::cli::config::{AppConfig, SubmitOptions};
use crate::form::error::FormError;
use crate::form::form_model::{FieldName, FormState};
use crate::form::validation::validate_form;
use crate::phone::formatter::PhoneFormatter;
use crate::report::console::format_console_report;
use crate::report::junit::generate_junit_xml;
use crate::report::report_model::ScenarioSuiteReport;
use crate::scenario::runner::ScenarioRunner;
use crate::scenario::scenario_model::Scenario;
use crate::submit::controller::{SubmissionController, SubmitReport};
use crate::submit::responder::{MockResponder, Responder, ScriptedResponder};
use crate::submit::view::ConsoleView;
use crate::trace::logger::TraceLogger;

// ============================================================================
// format subcommand
// ============================================================================

/// Print the formatted phone and return whether it is valid.
pub fn cmd_format(phone: &str) -> bool {
    let valid = PhoneFormatter::validate(phone);
    println!("formatted: {}", PhoneFormatter::output_view(phone));
    println!("digits:    {}", PhoneFormatter::clear_from_chars(phone));
    println!("valid:     {}", valid);
    valid
}

// ============================================================================
// check subcommand
// ============================================================================

/// Validate the three fields as the form would store them.
pub fn cmd_check(fio: &str, email: &str, phone: &str) -> bool {
    let state = FormState {
        fio: fio.to_string(),
        email: email.to_string(),
        phone: PhoneFormatter::output_view(phone),
    };
    let result = validate_form(&state);

    for field in FieldName::ALL {
        let mark = if result.is_field_valid(field) { "ok" } else { "INVALID" };
        println!("{:<6} {:<8} {:?}", field, mark, state.get(field));
    }

    for failure in result.failures() {
        log::info!("{}", failure);
    }

    result.is_valid
}

// ============================================================================
// submit subcommand
// ============================================================================

/// Fill the form, submit it and wait for the outcome. Ctrl-C cancels.
pub async fn cmd_submit(options: SubmitOptions) -> Result<SubmitReport, Box<dyn std::error::Error>> {
    let responder: Arc<dyn Responder> = match &options.script {
        Some(keys) => Arc::new(ScriptedResponder::from_keys(options.delay, keys, &options.templates)),
        None => Arc::new(MockResponder::new(options.delay, options.templates.clone())),
    };

    let tracer = match &options.trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let mut controller = SubmissionController::new(responder, ConsoleView::new(), options.action)
        .with_tracer(Arc::new(tracer));
    controller.set_data(&options.patch);

    let handle = controller.cancel_handle();
    let submission = controller.submit();
    tokio::pin!(submission);

    let report = tokio::select! {
        report = &mut submission => report,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Cancelling submission...");
            handle.cancel();
            submission.await
        }
    };

    if let SubmitReport::Rejected { validation } = &report {
        for failure in validation.failures() {
            eprintln!("{}", failure);
        }
    }

    Ok(report)
}

// ============================================================================
// run subcommand
// ============================================================================

/// Replay scenarios and return whether all passed.
pub async fn cmd_run(
    scenario_path: &str,
    format: &str,
    output: Option<&str>,
    verbose: u8,
    config: &AppConfig,
) -> Result<bool, Box<dyn std::error::Error>> {
    let scenarios = load_scenarios(scenario_path)?;

    if scenarios.is_empty() {
        eprintln!("No scenarios found at: {}", scenario_path);
        return Ok(true);
    }

    if verbose > 0 {
        eprintln!("Running {} scenarios...", scenarios.len());
    }

    let delay = config.responder.delay();
    let templates = config.responder.templates();
    let start = std::time::Instant::now();

    let mut results = Vec::new();
    for scenario in &scenarios {
        if verbose > 0 {
            eprintln!("  Running: {}", scenario.name);
        }
        results.push(ScenarioRunner::run(scenario, delay, &templates).await);
    }

    let report = ScenarioSuiteReport::from_results(scenario_path, results)
        .with_duration(start.elapsed().as_millis());
    let all_passed = report.all_passed();

    let content = match format {
        "junit" => generate_junit_xml(&report),
        _ => format_console_report(&report),
    };

    match output {
        Some(path) => std::fs::write(path, &content).map_err(|e| FormError::ReportWrite {
            path: path.to_string(),
            source: e,
        })?,
        None => print!("{}", content),
    }

    Ok(all_passed)
}

/// Load scenarios from a single YAML file or a directory of YAML files.
pub fn load_scenarios(path: &str) -> Result<Vec<Scenario>, FormError> {
    let read_err = |e| FormError::ScenarioRead {
        path: path.to_string(),
        source: e,
    };

    let metadata = std::fs::metadata(path).map_err(read_err)?;
    if !metadata.is_dir() {
        return Ok(vec![parse_scenario_file(std::path::Path::new(path))?]);
    }

    let mut scenarios = Vec::new();
    for entry in std::fs::read_dir(path).map_err(read_err)? {
        let p = entry.map_err(read_err)?.path();
        if p.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            scenarios.push(parse_scenario_file(&p)?);
        }
    }
    // Sort by name for deterministic order
    scenarios.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(scenarios)
}

fn parse_scenario_file(path: &std::path::Path) -> Result<Scenario, FormError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| FormError::ScenarioRead {
        path: display.clone(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| FormError::ScenarioParse {
        path: display,
        source: e,
    })
}

