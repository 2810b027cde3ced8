//! Walkthrough error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a walkthrough before or outside the replay.
///
/// A command the order rejects is not one of these; it is reported in the
/// [`Report`](crate::Report) and the replay carries on.
#[derive(Debug, Error)]
pub enum WalkthroughError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Script(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to install metrics recorder: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}
