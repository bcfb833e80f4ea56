use clap::Parser;
use form_submit::cli::commands::{cmd_check, cmd_format, cmd_run, cmd_submit};
use form_submit::cli::config::{Cli, Commands, build_submit_options, init_logging, load_config};
use form_submit::submit::controller::SubmitReport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Format { phone } => {
            if !cmd_format(&phone) {
                std::process::exit(1);
            }
        }
        Commands::Check { fio, email, phone } => {
            if !cmd_check(&fio, &email, &phone) {
                std::process::exit(1);
            }
        }
        Commands::Submit {
            fio,
            email,
            phone,
            action,
            script,
            delay_ms,
            trace,
        } => {
            // CLI > config > defaults
            let options = build_submit_options(
                &config,
                &fio,
                &email,
                &phone,
                action.as_deref(),
                script.as_deref(),
                delay_ms,
                trace.as_deref(),
            )?;
            let report = cmd_submit(options).await?;
            if !matches!(report, SubmitReport::Completed { .. }) {
                std::process::exit(1);
            }
        }
        Commands::Run {
            scenario,
            format,
            output,
        } => {
            let format = format.unwrap_or_else(|| config.run.format.clone());
            let output = output.or_else(|| config.run.output.clone());
            let all_passed = cmd_run(&scenario, &format, output.as_deref(), cli.verbose, &config).await?;
            if !all_passed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
