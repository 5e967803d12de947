//! Fraud detector handlers.

use pegasus_analyzers::Toolkit;
use pegasus_protocol::{BridgeError, BridgeResponse};

use super::Arguments;
use crate::encoder::outcome;

/// `fraud_check_imei(imei)`
pub fn fraud_check_imei(args: &Arguments, toolkit: &dyn Toolkit) -> Result<BridgeResponse, BridgeError> {
    let detector = toolkit.fraud_detector();
    outcome(detector.check_imei_indonesia(args.get(0)))
}

/// `fraud_check_phone(phone)`
pub fn fraud_check_phone(args: &Arguments, toolkit: &dyn Toolkit) -> Result<BridgeResponse, BridgeError> {
    let detector = toolkit.fraud_detector();
    outcome(detector.analyze_phone_fraud_deep(args.get(0)))
}
