use std::time::Duration;

use clap::{Parser, Subcommand};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::form::error::FormError;
use crate::form::form_model::{FieldName, FormPatch};
use crate::submit::outcome::{
    DEFAULT_ERROR_REASON, DEFAULT_PROGRESS_TIMEOUT_MS, OutcomeTemplates, ResponseKey,
};
use crate::submit::responder::DEFAULT_RESPONSE_DELAY_MS;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-submit",
    version,
    about = "Contact form validation and retrying submission"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-submit.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format a phone number and check it
    Format {
        /// Raw phone input, any characters
        phone: String,
    },

    /// Validate the three form fields without submitting
    Check {
        #[arg(long, default_value = "")]
        fio: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,
    },

    /// Fill the form and submit it against the mock responder
    Submit {
        #[arg(long, default_value = "")]
        fio: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        /// Form action: success, error or progress
        #[arg(long)]
        action: Option<String>,

        /// Comma separated answers to play back instead of `--action`,
        /// e.g. progress,progress,success
        #[arg(long)]
        script: Option<String>,

        /// Simulated network delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Append submission trace events (JSON Lines) to this file
        #[arg(long)]
        trace: Option<String>,
    },

    /// Replay form scenarios from YAML files
    Run {
        /// Path to a scenario YAML file or a directory of them
        #[arg(long)]
        scenario: String,

        /// Output format: console, junit
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-submit.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub responder: ResponderConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "default_progress_timeout_ms")]
    pub progress_timeout_ms: u64,

    #[serde(default = "default_error_reason")]
    pub error_reason: String,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_RESPONSE_DELAY_MS,
            progress_timeout_ms: DEFAULT_PROGRESS_TIMEOUT_MS,
            error_reason: DEFAULT_ERROR_REASON.to_string(),
        }
    }
}

impl ResponderConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn templates(&self) -> OutcomeTemplates {
        OutcomeTemplates {
            error_reason: self.error_reason.clone(),
            progress_timeout_ms: self.progress_timeout_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_action")]
    pub action: ResponseKey,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            action: ResponseKey::Success,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub output: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            format: "console".to_string(),
            output: None,
        }
    }
}

// Serde default helpers
fn default_delay_ms() -> u64 { DEFAULT_RESPONSE_DELAY_MS }
fn default_progress_timeout_ms() -> u64 { DEFAULT_PROGRESS_TIMEOUT_MS }
fn default_error_reason() -> String { DEFAULT_ERROR_REASON.to_string() }
fn default_action() -> ResponseKey { ResponseKey::Success }
fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-submit.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!("ignoring malformed config {}: {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Map `-v` occurrences to a log level: warn, info, debug, trace.
pub fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Initialise env_logger. `RUST_LOG` wins over the `-v` count.
pub fn init_logging(verbose: u8) {
    let default_filter = log_level(verbose).to_string().to_lowercase();
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

// ============================================================================
// Option Builders (merge CLI args with config file)
// ============================================================================

/// Everything `submit` needs, resolved from CLI args and config.
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    pub patch: FormPatch,
    pub action: ResponseKey,
    pub script: Option<Vec<ResponseKey>>,
    pub delay: Duration,
    pub templates: OutcomeTemplates,
    pub trace_path: Option<String>,
}

/// Resolve submit options: CLI > config > defaults.
pub fn build_submit_options(
    config: &AppConfig,
    fio: &str,
    email: &str,
    phone: &str,
    action: Option<&str>,
    script: Option<&str>,
    delay_ms: Option<u64>,
    trace: Option<&str>,
) -> Result<SubmitOptions, FormError> {
    let action = match action {
        Some(key) => key.parse()?,
        None => config.form.action,
    };

    Ok(SubmitOptions {
        patch: FormPatch::new()
            .with(FieldName::Fio, fio)
            .with(FieldName::Email, email)
            .with(FieldName::Phone, phone),
        action,
        script: script.map(parse_script).transpose()?,
        delay: delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| config.responder.delay()),
        templates: config.responder.templates(),
        trace_path: trace.map(str::to_string).or_else(|| config.trace.path.clone()),
    })
}

/// Parse `progress, progress,success` into response keys.
pub fn parse_script(script: &str) -> Result<Vec<ResponseKey>, FormError> {
    script
        .split(',')
        .filter(|key| !key.trim().is_empty())
        .map(|key| key.parse::<ResponseKey>())
        .collect()
}
