//! Logging initialization.
//!
//! All log output goes to stderr; stdout carries gallery data only.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG`, when set, overrides `default_level`.
pub fn init(default_level: &str, json_format: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` config section, with CLI overrides.
pub fn init_from_config(config: &vista_core::Config, verbose: bool, json_logs: bool) {
    let level = resolve_level(&config.logging.level, verbose);
    let json_format = json_logs || config.logging.format.eq_ignore_ascii_case("json");
    init(level, json_format);
}

/// `--verbose` raises the level to at least debug; unknown levels fall back to info.
fn resolve_level(configured: &str, verbose: bool) -> &'static str {
    let configured = match configured.to_ascii_lowercase().as_str() {
        "error" => "error",
        "warn" => "warn",
        "debug" => "debug",
        "trace" => "trace",
        _ => "info",
    };
    if verbose && configured != "trace" {
        "debug"
    } else {
        configured
    }
}
