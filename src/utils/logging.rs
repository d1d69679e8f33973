//! Logging initialization
//!
//! - Respects RUST_LOG environment variable
//! - Falls back to the configured filter, then to "warn"
//! - Writes to stderr so stdout only carries usage text
//!
//! # Usage
//! ```rust,no_run
//! use evmtest_modload::utils::init_logging;
//!
//! init_logging(None); // Uses RUST_LOG or defaults to "warn"
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used when neither RUST_LOG nor config provide one
pub const DEFAULT_FILTER: &str = "warn";

/// Build the env filter: RUST_LOG, then `filter`, then [`DEFAULT_FILTER`]
pub fn build_env_filter(filter: Option<&str>) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER))
}

/// Initialize human-readable logging
///
/// # Arguments
/// * `filter` - Optional log filter from config (e.g., "info", "evmtest_modload=debug").
///              RUST_LOG still takes precedence.
pub fn init_logging(filter: Option<&str>) {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(std::env::var("NO_COLOR").is_err()), // Respect NO_COLOR standard
        )
        .with(build_env_filter(filter))
        .init();
}

/// Initialize logging with JSON output
///
/// Useful when a test harness collects loader output alongside the kernel log.
#[cfg(feature = "json-logging")]
pub fn init_json_logging(filter: Option<&str>) {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(true)
                .with_span_list(true),
        )
        .with(build_env_filter(filter))
        .init();
}

/// Initialize logging from LoaderConfig
///
/// Falls back to human-readable output if JSON is requested but the
/// `json-logging` feature is not compiled in.
pub fn init_logging_from_config(config: Option<&LoggingConfig>) {
    let filter = config.and_then(|c| c.filter.as_deref());

    if config.map(|c| c.json_format).unwrap_or(false) {
        #[cfg(feature = "json-logging")]
        {
            init_json_logging(filter);
        }
        #[cfg(not(feature = "json-logging"))]
        {
            init_logging(filter);
        }
    } else {
        init_logging(filter);
    }
}
