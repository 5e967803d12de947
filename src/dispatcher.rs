//! Command routing and invocation.
//!
//! Resolves the command name against the binding table and hands the
//! extracted arguments to the matching handler.

use pegasus_analyzers::Toolkit;
use pegasus_protocol::{BridgeError, BridgeRequest, BridgeResponse, Command};
use tracing::debug;

use crate::handlers::{self, Arguments};
use crate::telemetry::DISPATCH_TARGET;

/// Resolve the command named by the request.
///
/// Matching is exact and case-sensitive; a missing command never matches.
pub fn route(request: &BridgeRequest) -> Option<Command> {
    request.command.as_deref().and_then(Command::from_name)
}

/// Invoke the collaborator operation bound to `command`.
pub fn invoke(
    command: Command,
    request: &BridgeRequest,
    toolkit: &dyn Toolkit,
) -> Result<BridgeResponse, BridgeError> {
    let binding = command.binding();
    let args = Arguments::extract(request, binding)?;
    debug!(
        target: DISPATCH_TARGET,
        collaborator = %binding.collaborator,
        operation = binding.operation,
        "invoking collaborator"
    );

    match command {
        Command::AnalyzeNik => handlers::nik::analyze_nik(&args, toolkit),
        Command::CheckSlik => handlers::nik::check_slik(&args, toolkit),
        Command::AnalyzePhone => handlers::phone::analyze_phone(&args, toolkit),
        Command::FraudCheckImei => handlers::fraud::fraud_check_imei(&args, toolkit),
        Command::FraudCheckPhone => handlers::fraud::fraud_check_phone(&args, toolkit),
        Command::AnalyzePersona => handlers::persona::analyze_persona(&args, toolkit),
        Command::TrackDevice => handlers::tracking::track_device(&args, toolkit),
    }
}

/// Route and invoke a decoded request.
///
/// An unknown command is a normal response, not a fault.
pub fn dispatch(request: &BridgeRequest, toolkit: &dyn Toolkit) -> Result<BridgeResponse, BridgeError> {
    match route(request) {
        Some(command) => invoke(command, request, toolkit),
        None => Ok(BridgeResponse::unknown_command(request.command_label())),
    }
}
