//! Logging setup for the Hearth binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Logging is enabled for the Hearth library crates and for the binary itself.
/// The level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hearth-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use hearth_shared::logger::setup_logger;
///
/// setup_logger("hearth-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the directive string used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "hearth_shared={level},hearth_server={level},hearth_client={level},{bin}={level},tower_http={level}",
        level = default_log_level,
        bin = binary_name.replace('-', "_"),
    )
}
