//! Built-in defaults (lowest layer)

use serde::{Deserialize, Serialize};

/// Log filter used when nothing else is configured. Only warnings and
/// errors reach stderr so hosts that capture it stay quiet.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Output format for diagnostic logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` EnvFilter directive.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "logging": {
                "filter": self.filter,
                "format": self.format,
            }
        })
    }
}
