//! Effective configuration with provenance
//!
//! Records the merged configuration together with the sources that
//! contributed to it, so startup logs can show where each setting came from.

use pegasus_analyzers::DataSources;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::defaults::LoggingConfig;
use super::merge::merge_layers;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "PEGASUS_BRIDGE_CONFIG";

/// Environment variable overriding `logging.filter`.
pub const LOG_FILTER_ENV: &str = "PEGASUS_BRIDGE_LOG";

/// Environment variable overriding `logging.format`.
pub const LOG_FORMAT_ENV: &str = "PEGASUS_BRIDGE_LOG_FORMAT";

/// Origin of a configuration layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Env,
}

/// A contributing layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (files only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 of the raw file bytes (files only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Bridge settings after all layers are merged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub logging: LoggingConfig,
    pub analyzers: DataSources,
}

/// Merged configuration plus the layers it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub config: BridgeConfig,
    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Load configuration from the process environment.
    pub fn load(cli_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(cli_path, |key| std::env::var(key).ok())
    }

    /// Load configuration with an explicit environment lookup.
    ///
    /// `cli_path` takes precedence over `PEGASUS_BRIDGE_CONFIG`. A named file
    /// that does not exist is an error; without one only defaults and
    /// environment overrides apply.
    pub fn load_with<F>(cli_path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layers = vec![LoggingConfig::default().to_value()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        let path = cli_path
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).filter(|p| !p.is_empty()).map(PathBuf::from));

        if let Some(path) = &path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            let (value, digest) = load_toml_file(path)?;
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        let mut logging = serde_json::Map::new();
        if let Some(filter) = env(LOG_FILTER_ENV).filter(|f| !f.is_empty()) {
            logging.insert("filter".to_string(), Value::String(filter));
        }
        if let Some(format) = env(LOG_FORMAT_ENV).filter(|f| !f.is_empty()) {
            logging.insert("format".to_string(), Value::String(format.to_lowercase()));
        }
        if !logging.is_empty() {
            layers.push(serde_json::json!({ "logging": logging }));
            sources.push(ConfigSource {
                origin: ConfigOrigin::Env,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        let mut config: BridgeConfig =
            serde_json::from_value(merged).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(dir) = path.as_deref().and_then(Path::parent) {
            config.analyzers = config.analyzers.resolve_against(dir);
        }

        Ok(Self { config, sources })
    }
}

/// Load and parse a TOML file, returning the value and digest
fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let digest = hex::encode(Sha256::digest(&bytes));

    let contents = String::from_utf8(bytes).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: format!("invalid UTF-8: {}", e),
    })?;

    let table: toml::Value = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok((toml_to_json(table), digest))
}

/// Convert TOML to JSON for merging
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_only() {
        let effective = EffectiveConfig::load_with(None, no_env).unwrap();
        assert_eq!(effective.config, BridgeConfig::default());
        assert_eq!(effective.sources.len(), 1);
        assert_eq!(effective.sources[0].origin, ConfigOrigin::Builtin);
    }

    #[test]
    fn test_file_layer_with_digest_and_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bridge.toml");
        fs::write(
            &path,
            "[logging]\nfilter = \"debug\"\n\n[analyzers]\nregions = \"regions.toml\"\nimei_blacklist = \"/srv/imei.txt\"\n",
        )
        .unwrap();

        let effective = EffectiveConfig::load_with(Some(&path), no_env).unwrap();
        assert_eq!(effective.config.logging.filter, "debug");
        assert_eq!(effective.config.logging.format, LogFormat::Text);
        assert_eq!(effective.config.analyzers.regions, Some(dir.path().join("regions.toml")));
        assert_eq!(effective.config.analyzers.imei_blacklist, Some(PathBuf::from("/srv/imei.txt")));

        let file = &effective.sources[1];
        assert_eq!(file.origin, ConfigOrigin::File);
        assert_eq!(file.digest.as_ref().map(String::len), Some(64));
    }

    #[test]
    fn test_config_path_from_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bridge.toml");
        fs::write(&path, "[logging]\nformat = \"json\"\n").unwrap();

        let env = env_from(&[(CONFIG_ENV, path.to_str().unwrap())]);
        let effective = EffectiveConfig::load_with(None, env).unwrap();
        assert_eq!(effective.config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bridge.toml");
        fs::write(&path, "[logging]\nfilter = \"info\"\n").unwrap();

        let env = env_from(&[(LOG_FILTER_ENV, "pegasus_bridge=trace"), (LOG_FORMAT_ENV, "JSON")]);
        let effective = EffectiveConfig::load_with(Some(&path), env).unwrap();
        assert_eq!(effective.config.logging.filter, "pegasus_bridge=trace");
        assert_eq!(effective.config.logging.format, LogFormat::Json);
        assert_eq!(effective.sources.last().map(|s| s.origin), Some(ConfigOrigin::Env));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = EffectiveConfig::load_with(Some(Path::new("/nonexistent/bridge.toml")), no_env)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bridge.toml");
        fs::write(&path, "[logging\n").unwrap();

        let err = EffectiveConfig::load_with(Some(&path), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_log_format_is_invalid() {
        let env = env_from(&[(LOG_FORMAT_ENV, "xml")]);
        let err = EffectiveConfig::load_with(None, env).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_toml_to_json() {
        let table: toml::Value = toml::from_str("a = 1\nb = [true, 2.5]\n[c]\nd = \"x\"\n").unwrap();
        assert_eq!(
            toml_to_json(table),
            serde_json::json!({"a": 1, "b": [true, 2.5], "c": {"d": "x"}})
        );
    }
}
