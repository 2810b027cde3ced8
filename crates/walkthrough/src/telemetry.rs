//! Tracing and metrics setup.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, LogFormat};
use crate::error::WalkthroughError;

/// Installs the global tracing subscriber. Logs go to stderr.
pub fn init_tracing(config: &Config) {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.log_format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Filter built from `config.log_level`, or the default level when that does
/// not parse.
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_new(&config.log_level).unwrap_or_else(|err| {
        let fallback = Config::default().log_level;
        eprintln!("ignoring log filter `{}` ({err}), using `{fallback}`", config.log_level);
        EnvFilter::new(fallback)
    })
}

/// Installs the global Prometheus recorder and returns a handle for rendering.
pub fn install_metrics() -> Result<PrometheusHandle, WalkthroughError> {
    Ok(PrometheusBuilder::new().install_recorder()?)
}
