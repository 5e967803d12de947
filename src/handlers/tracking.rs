//! Device tracker handler.

use pegasus_analyzers::Toolkit;
use pegasus_protocol::{BridgeError, BridgeResponse};

use super::Arguments;
use crate::encoder::outcome;

/// `track_device(phone)`
pub fn track_device(args: &Arguments, toolkit: &dyn Toolkit) -> Result<BridgeResponse, BridgeError> {
    let tracker = toolkit.device_tracker();
    outcome(tracker.track_device(args.get(0)))
}
