//! Bridge configuration
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. Config file (`--config` or `PEGASUS_BRIDGE_CONFIG`)
//! 3. Environment overrides (`PEGASUS_BRIDGE_LOG`, `PEGASUS_BRIDGE_LOG_FORMAT`)

mod defaults;
mod effective;
mod merge;

pub use defaults::{LogFormat, LoggingConfig, DEFAULT_LOG_FILTER};
pub use effective::{
    BridgeConfig, ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, CONFIG_ENV,
    LOG_FILTER_ENV, LOG_FORMAT_ENV,
};
pub use merge::{deep_merge, merge_layers};
