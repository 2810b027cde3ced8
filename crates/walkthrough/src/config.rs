//! Walkthrough configuration loaded from environment variables.

use std::path::PathBuf;

use crate::error::WalkthroughError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Walkthrough configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `WALKTHROUGH_SCRIPT`: JSON script to replay (default: built-in scenario)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `WALKTHROUGH_METRICS`: print Prometheus metrics when done (default: `false`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub script: Option<PathBuf>,
    pub log_level: String,
    pub log_format: LogFormat,
    pub print_metrics: bool,
}

impl Config {
    /// Loads configuration from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, WalkthroughError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WalkthroughError> {
        let defaults = Self::default();

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") => defaults.log_format,
            Some(value) if value.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(other) => {
                return Err(WalkthroughError::Config(format!(
                    "LOG_FORMAT must be `pretty` or `json`, got `{other}`"
                )));
            }
        };

        let print_metrics = match lookup("WALKTHROUGH_METRICS").as_deref().map(str::trim) {
            None | Some("") => defaults.print_metrics,
            Some(value) => parse_flag(value).ok_or_else(|| {
                WalkthroughError::Config(format!(
                    "WALKTHROUGH_METRICS must be true or false, got `{value}`"
                ))
            })?,
        };

        Ok(Self {
            script: lookup("WALKTHROUGH_SCRIPT")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format,
            print_metrics,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            print_metrics: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.script, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("WALKTHROUGH_SCRIPT", "scripts/scenario.json"),
            ("RUST_LOG", "domain=debug"),
            ("LOG_FORMAT", "JSON"),
            ("WALKTHROUGH_METRICS", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.script, Some(PathBuf::from("scripts/scenario.json")));
        assert_eq!(config.log_level, "domain=debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.print_metrics);
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let err = Config::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, WalkthroughError::Config(msg) if msg.contains("xml")));
    }

    #[test]
    fn test_rejects_unparseable_metrics_flag() {
        let err = Config::from_lookup(lookup(&[("WALKTHROUGH_METRICS", "maybe")])).unwrap_err();
        assert!(matches!(err, WalkthroughError::Config(_)));
    }
}
