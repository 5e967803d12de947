//! Capability traits implemented by collaborators.
//!
//! Arguments arrive positionally from the request payload; a missing or null
//! field is passed as `None` and each implementation decides what that means.

use crate::error::AnalyzerResult;
use crate::fraud::{ImeiReport, PhoneFraudReport};
use crate::nik::{NikReport, SlikReport};
use crate::persona::PersonaReport;
use crate::phone::PhoneReport;
use crate::tracking::TrackingReport;

/// Identity-number (NIK) processing.
pub trait NikAnalysis {
    /// Decode the structure of a NIK.
    fn parse_nik(&self, nik: Option<&str>) -> AnalyzerResult<NikReport>;

    /// Check a NIK against the SLIK OJK credit registry.
    fn check_slik_ojk(&self, nik: Option<&str>) -> AnalyzerResult<SlikReport>;
}

/// Phone-number analysis.
pub trait PhoneAnalysis {
    fn analyze_phone(&self, phone: Option<&str>) -> AnalyzerResult<PhoneReport>;
}

/// Fraud screening for devices and phone numbers.
pub trait FraudScreening {
    fn check_imei_indonesia(&self, imei: Option<&str>) -> AnalyzerResult<ImeiReport>;

    fn analyze_phone_fraud_deep(&self, phone: Option<&str>) -> AnalyzerResult<PhoneFraudReport>;
}

/// Persona aggregation across identity and phone data.
pub trait PersonaAnalysis {
    fn full_analysis_persona(
        &self,
        name: Option<&str>,
        phone: Option<&str>,
        nik: Option<&str>,
    ) -> AnalyzerResult<PersonaReport>;
}

/// Device tracking.
pub trait DeviceTracking {
    fn track_device(&self, phone: Option<&str>) -> AnalyzerResult<TrackingReport>;
}
