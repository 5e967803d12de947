//! Phone processor handler.

use pegasus_analyzers::Toolkit;
use pegasus_protocol::{BridgeError, BridgeResponse};

use super::Arguments;
use crate::encoder::outcome;

/// `analyze_phone(phone)`
pub fn analyze_phone(args: &Arguments, toolkit: &dyn Toolkit) -> Result<BridgeResponse, BridgeError> {
    let processor = toolkit.phone_processor();
    outcome(processor.analyze_phone(args.get(0)))
}
