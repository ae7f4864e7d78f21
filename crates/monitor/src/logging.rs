//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::MonitorError;

/// Initialize logging. `RUST_LOG` takes precedence over `default_level`.
pub fn init_logging(default_level: &str, json: bool) -> Result<(), MonitorError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| MonitorError::Logging(e.to_string()))
}
