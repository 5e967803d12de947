//! NIK processor handlers.

use pegasus_analyzers::Toolkit;
use pegasus_protocol::{BridgeError, BridgeResponse};

use super::Arguments;
use crate::encoder::outcome;

/// `analyze_nik(nik)`
pub fn analyze_nik(args: &Arguments, toolkit: &dyn Toolkit) -> Result<BridgeResponse, BridgeError> {
    let processor = toolkit.nik_processor();
    outcome(processor.parse_nik(args.get(0)))
}

/// `check_slik(nik)`
pub fn check_slik(args: &Arguments, toolkit: &dyn Toolkit) -> Result<BridgeResponse, BridgeError> {
    let processor = toolkit.nik_processor();
    outcome(processor.check_slik_ojk(args.get(0)))
}
