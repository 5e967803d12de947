//! Persona analyzer: aggregates identity and phone findings for a target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::capability::{NikAnalysis, PersonaAnalysis, PhoneAnalysis};
use crate::data::ReferenceData;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::nik::{NikProcessor, NikReport};
use crate::phone::{PhoneProcessor, PhoneReport};

/// Upper bound (exclusive) of the persona risk score.
const RISK_SCORE_RANGE: u32 = 30;

/// Separator between fingerprinted fields.
const FIELD_SEPARATOR: u8 = 0x1f;

/// Identity section: the parsed NIK, or why it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentityFinding {
    Parsed(NikReport),
    Rejected { error: String },
}

/// Score block of a persona report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaScore {
    pub risk_score: u32,
    pub status: String,
}

/// Result of `full_analysis_persona`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaReport {
    /// Target name, `Unknown` when not given.
    pub target: String,
    pub phone: Option<String>,
    pub nik: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_profile: Option<PhoneReport>,
    pub analysis: PersonaScore,
    /// Hex SHA-256 over the supplied fields.
    pub fingerprint: String,
    pub timestamp: DateTime<Utc>,
}

/// Reference persona analyzer.
#[derive(Debug)]
pub struct PersonaAnalyzer<'a> {
    data: &'a ReferenceData,
}

impl<'a> PersonaAnalyzer<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }
}

/// SHA-256 over the fields, absent fields hashed as empty.
fn fingerprint(fields: &[Option<&str>]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field.unwrap_or_default().as_bytes());
        hasher.update([FIELD_SEPARATOR]);
    }
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl PersonaAnalysis for PersonaAnalyzer<'_> {
    fn full_analysis_persona(
        &self,
        name: Option<&str>,
        phone: Option<&str>,
        nik: Option<&str>,
    ) -> AnalyzerResult<PersonaReport> {
        let name = non_empty(name);
        let phone = non_empty(phone);
        let nik = non_empty(nik);

        let identity = match nik {
            None => None,
            Some(nik) => match NikProcessor::new(self.data).parse_nik(Some(nik)) {
                Ok(report) => Some(IdentityFinding::Parsed(report)),
                Err(AnalyzerError::Rejected(error)) => Some(IdentityFinding::Rejected { error }),
                Err(fault) => return Err(fault),
            },
        };

        let phone_profile = match phone {
            None => None,
            Some(phone) => match PhoneProcessor::new(self.data).analyze_phone(Some(phone)) {
                Ok(report) => Some(report),
                Err(AnalyzerError::Rejected(_)) => None,
                Err(fault) => return Err(fault),
            },
        };

        let digest = fingerprint(&[name, phone, nik]);
        let seed = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);

        Ok(PersonaReport {
            target: name.unwrap_or("Unknown").to_string(),
            phone: phone.map(str::to_string),
            nik: nik.map(str::to_string),
            identity,
            phone_profile,
            analysis: PersonaScore {
                risk_score: seed % RISK_SCORE_RANGE,
                status: "analyzed".to_string(),
            },
            fingerprint: hex::encode(digest),
            timestamp: Utc::now(),
        })
    }
}
