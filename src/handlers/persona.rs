//! Persona analyzer handler.

use pegasus_analyzers::Toolkit;
use pegasus_protocol::{BridgeError, BridgeResponse};

use super::Arguments;
use crate::encoder::outcome;

/// `analyze_persona(name, phone, nik)`
pub fn analyze_persona(args: &Arguments, toolkit: &dyn Toolkit) -> Result<BridgeResponse, BridgeError> {
    let analyzer = toolkit.persona_analyzer();
    outcome(analyzer.full_analysis_persona(args.get(0), args.get(1), args.get(2)))
}
