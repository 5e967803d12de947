//! Error types for the bridge protocol.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Classification of a failure response.
///
/// These codes are stable and used in logs; they are never written into
/// the response body, which only carries the `error` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No request argument was supplied.
    NoInput,
    /// The command is missing or not in the binding table.
    UnknownCommand,
    /// A collaborator refused the input as a domain-level outcome.
    Rejected,
    /// Any fault while decoding, routing or invoking.
    ExecutionError,
    /// A collaborator or its configuration could not be loaded at startup.
    ImportError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInput => write!(f, "NO_INPUT"),
            Self::UnknownCommand => write!(f, "UNKNOWN_COMMAND"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::ExecutionError => write!(f, "EXECUTION_ERROR"),
            Self::ImportError => write!(f, "IMPORT_ERROR"),
        }
    }
}

/// Faults raised while decoding, routing or invoking a request.
///
/// Each variant keeps the structured cause; the message is only flattened
/// into the wire shape at the outermost boundary.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The request text is not valid JSON.
    #[error("{0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The request document is valid JSON but not an object.
    #[error("request must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// The payload is present but not an object.
    #[error("payload must be a JSON object, got {0}")]
    PayloadNotObject(&'static str),

    /// A payload field cannot be passed as a scalar argument.
    #[error("argument '{field}' must be a string, number or boolean, got {kind}")]
    ArgumentShape {
        field: &'static str,
        kind: &'static str,
    },

    /// A collaborator failed internally.
    #[error("{0}")]
    Collaborator(String),

    /// The request could not be read.
    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),

    /// The request exceeds the input size limit.
    #[error("request exceeds maximum size of {max} bytes")]
    TooLarge { max: usize },

    /// The process arguments could not be parsed.
    #[error("invalid arguments: {0}")]
    Arguments(String),
}

/// Human name of a JSON value's type, used in error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
