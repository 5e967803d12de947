//! Result encoding.
//!
//! Turns collaborator outcomes into responses and writes the single
//! response line.

use std::fmt;
use std::io::{self, Write};

use pegasus_analyzers::{AnalyzerError, AnalyzerResult};
use pegasus_protocol::{BridgeError, BridgeResponse};
use serde::Serialize;
use serde_json::Value;

/// Serialize a result, falling back to its debug rendering as a JSON string
/// when it cannot be represented.
pub fn to_json_value<T: Serialize + fmt::Debug>(result: &T) -> Value {
    match serde_json::to_value(result) {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(%error, "result not serializable, falling back to text");
            Value::String(format!("{:?}", result))
        }
    }
}

/// Map a collaborator outcome onto a response.
///
/// Rejections are domain results and pass through as `{"error": ...}`;
/// faults propagate to the outer boundary.
pub fn outcome<T: Serialize + fmt::Debug>(result: AnalyzerResult<T>) -> Result<BridgeResponse, BridgeError> {
    match result {
        Ok(report) => Ok(BridgeResponse::success(to_json_value(&report))),
        Err(AnalyzerError::Rejected(message)) => Ok(BridgeResponse::rejected(message)),
        Err(AnalyzerError::Fault(message)) => Err(BridgeError::Collaborator(message)),
    }
}

/// Write the response as one JSON line and flush.
pub fn write_response<W: Write>(writer: &mut W, response: &BridgeResponse) -> io::Result<()> {
    let line = match response.to_json_line() {
        Ok(line) => line,
        Err(error) => BridgeResponse::execution_error(error)
            .to_json_line()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
    };
    writeln!(writer, "{}", line)?;
    writer.flush()
}
