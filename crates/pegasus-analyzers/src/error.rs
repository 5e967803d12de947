//! Analyzer error types.

use std::path::PathBuf;

/// Outcome of a failed collaborator operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzerError {
    /// The input was refused as a domain-level result (e.g. malformed NIK).
    /// The message is returned to the caller verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The collaborator failed internally.
    #[error("{0}")]
    Fault(String),
}

impl AnalyzerError {
    /// Create a rejection.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Create an internal fault.
    pub fn fault(message: impl Into<String>) -> Self {
        Self::Fault(message.into())
    }
}

/// Result type returned by collaborator operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Errors loading reference data at startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid entry in {} line {line}: {reason}", .path.display())]
    Entry {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}
