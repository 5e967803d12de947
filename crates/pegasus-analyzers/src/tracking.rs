//! Device tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capability::{DeviceTracking, PhoneAnalysis};
use crate::data::ReferenceData;
use crate::error::AnalyzerResult;
use crate::phone::PhoneProcessor;

/// Result of `track_device`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub phone: String,
    pub status: String,
    pub provider: String,
    pub timezone: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Reference device tracker. Tracking is only initiated; no location is
/// resolved.
#[derive(Debug)]
pub struct DeviceTracker<'a> {
    data: &'a ReferenceData,
}

impl<'a> DeviceTracker<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }
}

impl DeviceTracking for DeviceTracker<'_> {
    fn track_device(&self, phone: Option<&str>) -> AnalyzerResult<TrackingReport> {
        let profile = PhoneProcessor::new(self.data).analyze_phone(phone)?;
        Ok(TrackingReport {
            phone: profile.phone_number,
            status: "tracked".to_string(),
            provider: profile.provider,
            timezone: profile.timezone,
            message: "Device tracking initiated".to_string(),
            timestamp: Utc::now(),
        })
    }
}
