//! Diagnostic logging.
//!
//! Logs go to stderr only; stdout carries exactly one response line and
//! nothing else.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{subscriber::SetGlobalDefaultError, Subscriber};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Tracing target for dispatch events.
pub const DISPATCH_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::dispatch");

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Errors encountered while configuring logging.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured filter directive does not parse.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// A global subscriber could not be installed.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Install the global subscriber on first call; later calls are no-ops.
pub fn initialise(config: &LoggingConfig) -> Result<(), TelemetryError> {
    TELEMETRY_GUARD.get_or_try_init(|| install_subscriber(config)).map(|_| ())
}

fn install_subscriber(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;

    let builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.format {
        LogFormat::Json => Box::new(builder(filter).json().flatten_event(true).finish()),
        LogFormat::Text => Box::new(builder(filter).finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_rejected() {
        let config = LoggingConfig {
            filter: "pegasus_bridge=notalevel".to_string(),
            format: LogFormat::Text,
        };
        assert!(matches!(
            install_subscriber(&config),
            Err(TelemetryError::Filter(_))
        ));
    }

    #[test]
    fn test_initialise_is_idempotent() {
        let config = LoggingConfig::default();
        initialise(&config).unwrap();
        initialise(&config).unwrap();
    }
}
