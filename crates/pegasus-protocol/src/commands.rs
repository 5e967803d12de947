//! Command names and the static binding table.
//!
//! Every supported command maps to exactly one collaborator operation and the
//! ordered list of payload fields passed to it positionally.

use serde::Serialize;
use std::fmt;

/// Known command names.
pub mod names {
    pub const ANALYZE_NIK: &str = "analyze_nik";
    pub const CHECK_SLIK: &str = "check_slik";
    pub const ANALYZE_PHONE: &str = "analyze_phone";
    pub const FRAUD_CHECK_IMEI: &str = "fraud_check_imei";
    pub const FRAUD_CHECK_PHONE: &str = "fraud_check_phone";
    pub const ANALYZE_PERSONA: &str = "analyze_persona";
    pub const TRACK_DEVICE: &str = "track_device";
}

/// Collaborator types a command can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collaborator {
    /// Identity-number (NIK) processor.
    NikProcessor,
    /// Phone-number processor.
    PhoneProcessor,
    /// IMEI and phone fraud detector.
    FraudDetector,
    /// Persona aggregation analyzer.
    PersonaAnalyzer,
    /// Device tracker.
    DeviceTracker,
}

impl Collaborator {
    /// Returns the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NikProcessor => "nik_processor",
            Self::PhoneProcessor => "phone_processor",
            Self::FraudDetector => "fraud_detector",
            Self::PersonaAnalyzer => "persona_analyzer",
            Self::DeviceTracker => "device_tracker",
        }
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Parse the structure of a NIK.
    AnalyzeNik,
    /// Check a NIK against the SLIK OJK credit registry.
    CheckSlik,
    /// Analyze a phone number.
    AnalyzePhone,
    /// Screen an IMEI for fraud.
    FraudCheckImei,
    /// Deep fraud screening of a phone number.
    FraudCheckPhone,
    /// Aggregate a persona from name, phone and NIK.
    AnalyzePersona,
    /// Start tracking the device behind a phone number.
    TrackDevice,
}

impl Command {
    /// All commands, in binding-table order.
    pub const ALL: [Command; 7] = [
        Command::AnalyzeNik,
        Command::CheckSlik,
        Command::AnalyzePhone,
        Command::FraudCheckImei,
        Command::FraudCheckPhone,
        Command::AnalyzePersona,
        Command::TrackDevice,
    ];

    /// Resolve a command by exact, case-sensitive name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            names::ANALYZE_NIK => Some(Self::AnalyzeNik),
            names::CHECK_SLIK => Some(Self::CheckSlik),
            names::ANALYZE_PHONE => Some(Self::AnalyzePhone),
            names::FRAUD_CHECK_IMEI => Some(Self::FraudCheckImei),
            names::FRAUD_CHECK_PHONE => Some(Self::FraudCheckPhone),
            names::ANALYZE_PERSONA => Some(Self::AnalyzePersona),
            names::TRACK_DEVICE => Some(Self::TrackDevice),
            _ => None,
        }
    }

    /// The binding this command routes through.
    pub fn binding(&self) -> &'static Binding {
        match self {
            Self::AnalyzeNik => &BINDINGS[0],
            Self::CheckSlik => &BINDINGS[1],
            Self::AnalyzePhone => &BINDINGS[2],
            Self::FraudCheckImei => &BINDINGS[3],
            Self::FraudCheckPhone => &BINDINGS[4],
            Self::AnalyzePersona => &BINDINGS[5],
            Self::TrackDevice => &BINDINGS[6],
        }
    }

    /// The wire name of this command.
    pub fn name(&self) -> &'static str {
        self.binding().command
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static association of a command with a collaborator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Binding {
    /// Command name as it appears on the wire.
    pub command: &'static str,
    /// Collaborator type constructed for the call.
    pub collaborator: Collaborator,
    /// Operation invoked on the collaborator.
    pub operation: &'static str,
    /// Payload keys extracted, in positional order.
    pub fields: &'static [&'static str],
}

/// The binding table, fixed at compile time.
pub static BINDINGS: [Binding; 7] = [
    Binding {
        command: names::ANALYZE_NIK,
        collaborator: Collaborator::NikProcessor,
        operation: "parse_nik",
        fields: &["nik"],
    },
    Binding {
        command: names::CHECK_SLIK,
        collaborator: Collaborator::NikProcessor,
        operation: "check_slik_ojk",
        fields: &["nik"],
    },
    Binding {
        command: names::ANALYZE_PHONE,
        collaborator: Collaborator::PhoneProcessor,
        operation: "analyze_phone",
        fields: &["phone"],
    },
    Binding {
        command: names::FRAUD_CHECK_IMEI,
        collaborator: Collaborator::FraudDetector,
        operation: "check_imei_indonesia",
        fields: &["imei"],
    },
    Binding {
        command: names::FRAUD_CHECK_PHONE,
        collaborator: Collaborator::FraudDetector,
        operation: "analyze_phone_fraud_deep",
        fields: &["phone"],
    },
    Binding {
        command: names::ANALYZE_PERSONA,
        collaborator: Collaborator::PersonaAnalyzer,
        operation: "full_analysis_persona",
        fields: &["name", "phone", "nik"],
    },
    Binding {
        command: names::TRACK_DEVICE,
        collaborator: Collaborator::DeviceTracker,
        operation: "track_device",
        fields: &["phone"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_resolves_to_its_own_binding() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
            assert_eq!(command.binding().command, command.name());
        }
    }

    #[test]
    fn test_command_lookup_is_case_sensitive() {
        assert_eq!(Command::from_name("analyze_phone"), Some(Command::AnalyzePhone));
        assert_eq!(Command::from_name("Analyze_Phone"), None);
        assert_eq!(Command::from_name("analyze_phone "), None);
        assert_eq!(Command::from_name("analyze"), None);
    }

    #[test]
    fn test_binding_table_has_unique_commands() {
        let mut seen = std::collections::HashSet::new();
        for binding in BINDINGS.iter() {
            assert!(seen.insert(binding.command), "duplicate binding {}", binding.command);
        }
        assert_eq!(seen.len(), Command::ALL.len());
    }

    #[test]
    fn test_persona_binding_field_order() {
        let binding = Command::AnalyzePersona.binding();
        assert_eq!(binding.fields, &["name", "phone", "nik"]);
        assert_eq!(binding.collaborator, Collaborator::PersonaAnalyzer);
    }

    #[test]
    fn test_binding_serializes_for_describe() {
        let value = serde_json::to_value(Command::FraudCheckImei.binding()).unwrap();
        assert_eq!(value["command"], "fraud_check_imei");
        assert_eq!(value["collaborator"], "fraud_detector");
        assert_eq!(value["operation"], "check_imei_indonesia");
        assert_eq!(value["fields"], serde_json::json!(["imei"]));
    }
}
