//! Walkthrough entry point.

use std::process::ExitCode;

use walkthrough::{Config, WalkthroughError, telemetry};

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    telemetry::init_tracing(&config);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "walkthrough failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), WalkthroughError> {
    let metrics = if config.print_metrics {
        Some(telemetry::install_metrics()?)
    } else {
        None
    };

    let report = walkthrough::run_from_config(config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(handle) = metrics {
        eprintln!("{}", handle.render());
    }
    Ok(())
}
