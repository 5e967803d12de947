//! Request envelope.

use serde_json::{Map, Value};

use crate::error::{json_kind, BridgeError};
use crate::SUBJECT_KEYS;

/// Named arguments accompanying a command.
pub type Payload = Map<String, Value>;

/// Decoded request envelope.
///
/// The host passes `{"command": ..., "payload": {...}}` as a single process
/// argument. Decoding only checks the outer document; the payload shape is
/// checked once a command has been routed, so an unknown command is reported
/// as such whatever its payload looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeRequest {
    /// Command as rendered in "unknown command" messages, `None` when absent
    /// or null.
    pub command: Option<String>,
    /// Raw payload; an empty object when the key is absent.
    pub payload: Value,
}

impl BridgeRequest {
    /// Parse a request from JSON text.
    pub fn parse(text: &str) -> Result<Self, BridgeError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a request from an already-parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self, BridgeError> {
        let mut object = match value {
            Value::Object(object) => object,
            other => return Err(BridgeError::NotAnObject(json_kind(&other))),
        };

        let command = match object.remove("command") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(Value::Bool(true)) => Some("True".to_string()),
            Some(Value::Bool(false)) => Some("False".to_string()),
            Some(other) => Some(other.to_string()),
        };

        let payload = object
            .remove("payload")
            .unwrap_or_else(|| Value::Object(Payload::new()));

        Ok(Self { command, payload })
    }

    /// Command as shown in "unknown command" messages.
    pub fn command_label(&self) -> &str {
        self.command.as_deref().unwrap_or("None")
    }

    /// The payload as a mapping.
    ///
    /// An explicit `null` payload is not a mapping and fails like any other
    /// non-object value.
    pub fn arguments(&self) -> Result<&Payload, BridgeError> {
        match &self.payload {
            Value::Object(payload) => Ok(payload),
            other => Err(BridgeError::PayloadNotObject(json_kind(other))),
        }
    }

    /// Look up a payload field; explicit `null` counts as absent.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload
            .as_object()?
            .get(key)
            .filter(|value| !value.is_null())
    }

    /// The request subject: first non-empty value of `nik`, `phone`, `imei`, `name`.
    pub fn subject(&self) -> Option<String> {
        SUBJECT_KEYS.iter().find_map(|key| match self.field(key)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
    }
}
