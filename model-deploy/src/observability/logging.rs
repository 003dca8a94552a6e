//! `tracing` subscriber configuration.

use tracing_subscriber::EnvFilter;

/// Level used when none is given or the given one cannot be parsed.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Builds the log filter for a level name or directive string.
///
/// Accepts `tracing` directives (`debug`, `model_deploy=trace`) and the
/// Python-style names `WARNING` and `CRITICAL` that build scripts commonly
/// pass through `LOGLEVEL`.
#[must_use]
pub fn log_filter(level: &str) -> EnvFilter {
    let normalized = match level.trim().to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "" => DEFAULT_LOG_LEVEL.to_string(),
        other => other.to_string(),
    };
    EnvFilter::try_new(&normalized).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber. Log lines carry file and line numbers.
pub fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();
}
