//! Process startup.
//!
//! Loads configuration, installs logging and loads the analyzers' reference
//! data. Any failure here is fatal and reported as an import error.

use std::path::Path;

use pegasus_analyzers::{LoadError, StandardToolkit};
use tracing::debug;

use crate::config::{ConfigError, EffectiveConfig};
use crate::telemetry::{self, TelemetryError};

/// Failure before a request can be handled.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Analyzers(#[from] LoadError),
}

/// Load everything needed to serve one request and return the toolkit.
pub fn start(config_path: Option<&Path>) -> Result<StandardToolkit, StartupError> {
    let config = EffectiveConfig::load(config_path)?;
    finish(config)
}

/// Start from an explicit environment lookup.
pub fn start_with<F>(config_path: Option<&Path>, env: F) -> Result<StandardToolkit, StartupError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = EffectiveConfig::load_with(config_path, env)?;
    finish(config)
}

fn finish(config: EffectiveConfig) -> Result<StandardToolkit, StartupError> {
    telemetry::initialise(&config.config.logging)?;
    for source in &config.sources {
        debug!(
            origin = ?source.origin,
            path = source.path.as_deref().unwrap_or("-"),
            digest = source.digest.as_deref().unwrap_or("-"),
            "config layer"
        );
    }

    Ok(StandardToolkit::load(&config.config.analyzers)?)
}
