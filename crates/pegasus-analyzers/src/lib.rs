//! Pegasus analyzers.
//!
//! Each collaborator the bridge can route to is described by a capability
//! trait with one method per supported command. The reference
//! implementations here work from built-in Indonesian reference tables that
//! can be extended through data files loaded once at startup.

pub mod capability;
pub mod data;
pub mod error;
pub mod fraud;
pub mod nik;
pub mod persona;
pub mod phone;
pub mod toolkit;
pub mod tracking;

pub use capability::{DeviceTracking, FraudScreening, NikAnalysis, PersonaAnalysis, PhoneAnalysis};
pub use data::{DataSources, OperatorPrefixes, ReferenceData};
pub use error::{AnalyzerError, AnalyzerResult, LoadError};
pub use fraud::{luhn_valid, FraudDetector, ImeiReport, PhoneFraudReport, RiskLevel};
pub use nik::{NikProcessor, NikReport, SlikReport};
pub use persona::{IdentityFinding, PersonaAnalyzer, PersonaReport, PersonaScore};
pub use phone::{normalize_phone, Geolocation, NormalizedPhone, PhoneProcessor, PhoneReport};
pub use toolkit::{StandardToolkit, Toolkit};
pub use tracking::{DeviceTracker, TrackingReport};
