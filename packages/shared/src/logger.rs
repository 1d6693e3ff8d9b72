//! Logging setup for the Oshin signaling relay.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Filters default to the given level for the library crate and the binary;
/// anything else stays at `warn` so dependency noise does not drown the
/// relay's own connection lifecycle logs. The `RUST_LOG` environment
/// variable overrides everything.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "oshin-server")
/// * `default_level` - The default log level (e.g., "debug", "info")
pub fn setup_logger(binary_name: &str, default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "warn,{}={},{}={}",
                    env!("CARGO_PKG_NAME").replace("-", "_"),
                    default_level,
                    binary_name.replace("-", "_"),
                    default_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
