//! Collaborator factories.
//!
//! The bridge asks the toolkit for a fresh collaborator on every call; only
//! the read-only reference data outlives a single invocation.

use crate::capability::{DeviceTracking, FraudScreening, NikAnalysis, PersonaAnalysis, PhoneAnalysis};
use crate::data::{DataSources, ReferenceData};
use crate::error::LoadError;
use crate::fraud::FraudDetector;
use crate::nik::NikProcessor;
use crate::persona::PersonaAnalyzer;
use crate::phone::PhoneProcessor;
use crate::tracking::DeviceTracker;

/// Constructs collaborator instances.
pub trait Toolkit {
    fn nik_processor(&self) -> Box<dyn NikAnalysis + '_>;
    fn phone_processor(&self) -> Box<dyn PhoneAnalysis + '_>;
    fn fraud_detector(&self) -> Box<dyn FraudScreening + '_>;
    fn persona_analyzer(&self) -> Box<dyn PersonaAnalysis + '_>;
    fn device_tracker(&self) -> Box<dyn DeviceTracking + '_>;
}

/// Toolkit backed by the reference analyzers.
#[derive(Debug, Clone, Default)]
pub struct StandardToolkit {
    data: ReferenceData,
}

impl StandardToolkit {
    /// Create a toolkit over already-loaded reference data.
    pub fn new(data: ReferenceData) -> Self {
        Self { data }
    }

    /// Load reference data from the given sources.
    pub fn load(sources: &DataSources) -> Result<Self, LoadError> {
        ReferenceData::load(sources).map(Self::new)
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }
}

impl Toolkit for StandardToolkit {
    fn nik_processor(&self) -> Box<dyn NikAnalysis + '_> {
        Box::new(NikProcessor::new(&self.data))
    }

    fn phone_processor(&self) -> Box<dyn PhoneAnalysis + '_> {
        Box::new(PhoneProcessor::new(&self.data))
    }

    fn fraud_detector(&self) -> Box<dyn FraudScreening + '_> {
        Box::new(FraudDetector::new(&self.data))
    }

    fn persona_analyzer(&self) -> Box<dyn PersonaAnalysis + '_> {
        Box::new(PersonaAnalyzer::new(&self.data))
    }

    fn device_tracker(&self) -> Box<dyn DeviceTracking + '_> {
        Box::new(DeviceTracker::new(&self.data))
    }
}
