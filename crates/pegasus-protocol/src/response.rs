//! Response envelope.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::ErrorCode;

/// Message emitted when the process is started without a request.
pub const NO_INPUT_MESSAGE: &str = "No input provided";

/// Response envelope.
///
/// Exactly one response is written per invocation, either the collaborator's
/// result passed through untouched or an object holding only `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BridgeResponse {
    /// Collaborator result, serialized as-is.
    Success(Value),
    /// Failure body `{"error": "..."}`.
    Failure {
        #[serde(skip)]
        code: ErrorCode,
        error: String,
    },
}

impl BridgeResponse {
    /// Create a success response.
    pub fn success(result: Value) -> Self {
        Self::Success(result)
    }

    /// Create a failure response with the given code and message.
    pub fn failure(code: ErrorCode, error: impl Into<String>) -> Self {
        Self::Failure {
            code,
            error: error.into(),
        }
    }

    /// No request argument was supplied.
    pub fn no_input() -> Self {
        Self::failure(ErrorCode::NoInput, NO_INPUT_MESSAGE)
    }

    /// The command is missing or unrecognized.
    pub fn unknown_command(command: &str) -> Self {
        Self::failure(ErrorCode::UnknownCommand, format!("Unknown command: {}", command))
    }

    /// A collaborator rejected the input; its message is passed through.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::failure(ErrorCode::Rejected, message)
    }

    /// A fault while decoding, routing or invoking.
    pub fn execution_error(message: impl fmt::Display) -> Self {
        Self::failure(ErrorCode::ExecutionError, format!("Execution Error: {}", message))
    }

    /// A startup failure loading collaborators or their configuration.
    pub fn import_error(message: impl fmt::Display) -> Self {
        Self::failure(ErrorCode::ImportError, format!("Import Error: {}", message))
    }

    /// Whether this response carries a result rather than an error.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Failure code, `None` for success.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success(_) => None,
            Self::Failure { code, .. } => Some(*code),
        }
    }

    /// Serialize to a single line of JSON (without the trailing newline).
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
