//! Scripted walkthrough of the order aggregate.
//!
//! Loads configuration from the environment, replays a command script
//! against a fresh order and reports every step.

pub mod config;
pub mod error;
pub mod script;
pub mod telemetry;

pub use config::{Config, LogFormat};
pub use error::WalkthroughError;
pub use script::{Report, Script, StepOutcome, run};

/// Loads the configured script, or the built-in scenario, and replays it.
pub fn run_from_config(config: &Config) -> Result<Report, WalkthroughError> {
    let script = match &config.script {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading script");
            Script::load(path)?
        }
        None => Script::builtin(),
    };
    Ok(run(script))
}
