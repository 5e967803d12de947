//! Request input.
//!
//! The request normally arrives as the single process argument. The
//! argument `-` reads the document from stdin instead.

use std::io::Read;

use pegasus_protocol::{BridgeError, BridgeRequest};

/// Argument value that selects stdin as the request source.
pub const STDIN_MARKER: &str = "-";

/// Maximum size of a request read from stdin (10 MB).
pub const MAX_REQUEST_SIZE: usize = 10 * 1024 * 1024;

/// Resolve the request text from the process argument.
pub fn request_text<R: Read>(argument: &str, stdin: &mut R) -> Result<String, BridgeError> {
    if argument == STDIN_MARKER {
        read_bounded(stdin)
    } else {
        Ok(argument.to_string())
    }
}

/// Decode the request envelope from the process argument.
pub fn read_request<R: Read>(argument: &str, stdin: &mut R) -> Result<BridgeRequest, BridgeError> {
    let text = request_text(argument, stdin)?;
    BridgeRequest::parse(&text)
}

fn read_bounded<R: Read>(reader: &mut R) -> Result<String, BridgeError> {
    let mut buffer = Vec::new();
    reader
        .take(MAX_REQUEST_SIZE as u64 + 1)
        .read_to_end(&mut buffer)?;
    if buffer.len() > MAX_REQUEST_SIZE {
        return Err(BridgeError::TooLarge {
            max: MAX_REQUEST_SIZE,
        });
    }
    String::from_utf8(buffer).map_err(|e| {
        BridgeError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
