//! Pegasus Bridge - single-shot JSON command bridge
//!
//! This crate reads one JSON request naming a command and its payload, routes
//! it to the analyzer bound to that command and writes exactly one JSON line
//! with the analyzer's result or an error.

pub mod bridge;
pub mod config;
pub mod dispatcher;
pub mod encoder;
pub mod handlers;
pub mod reader;
pub mod startup;
pub mod telemetry;

pub use bridge::CommandDispatcher;
pub use config::{BridgeConfig, ConfigError, EffectiveConfig};
pub use startup::{start, StartupError};
