//! Structured logging initialisation
//!
//! Installs a `tracing_subscriber::fmt` subscriber driven by [`LoggingConfig`].
//! `RUST_LOG`, when set, takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Error returned when the subscriber cannot be installed
pub type TracingInitError = Box<dyn std::error::Error + Send + Sync>;

/// Initialize tracing for the current process.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TracingInitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder.pretty().try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed; keeping existing one");
    }

    Ok(())
}
