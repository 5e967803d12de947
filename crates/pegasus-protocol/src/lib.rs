//! Pegasus Bridge Protocol Types
//!
//! Defines the single-shot JSON envelope exchanged between the host process
//! and the bridge: one request in, one response line out.

pub mod commands;
pub mod error;
pub mod request;
pub mod response;

pub use commands::{names, Binding, Collaborator, Command, BINDINGS};
pub use error::{BridgeError, ErrorCode};
pub use request::{BridgeRequest, Payload};
pub use response::BridgeResponse;

/// Payload keys inspected, in order, when naming the subject of a request.
pub const SUBJECT_KEYS: &[&str] = &["nik", "phone", "imei", "name"];
