//! Phone-number processor.

use serde::{Deserialize, Serialize};

use crate::capability::PhoneAnalysis;
use crate::data::ReferenceData;
use crate::error::{AnalyzerError, AnalyzerResult};

/// Indonesian country calling code.
pub const COUNTRY_CODE: &str = "62";

const UNKNOWN_PROVIDER: &str = "Unknown";
const COUNTRY: &str = "Indonesia";
const TIMEZONE: &str = "Asia/Jakarta";

/// Phone number reduced to digits in national and international form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPhone {
    /// Digits of the input, unchanged.
    pub digits: String,
    /// Number without trunk `0` or country code.
    pub national: String,
    /// `62` followed by the national number.
    pub international: String,
}

/// Strip formatting and normalize a local (`0…`) or international (`62…`)
/// number. Returns `None` when the input has no digits.
pub fn normalize_phone(input: &str) -> Option<NormalizedPhone> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let national = if let Some(rest) = digits.strip_prefix(COUNTRY_CODE) {
        rest.to_string()
    } else if let Some(rest) = digits.strip_prefix('0') {
        rest.to_string()
    } else {
        digits.clone()
    };
    let international = format!("{}{}", COUNTRY_CODE, national);
    Some(NormalizedPhone {
        digits,
        national,
        international,
    })
}

/// Geolocation block of a phone report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geolocation {
    pub country: String,
    pub location: String,
}

/// Result of `analyze_phone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneReport {
    /// Input as supplied.
    pub phone_number: String,
    /// E.164 form (`+62…`), absent when the input has no digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    /// Between 10 and 15 digits.
    pub valid: bool,
    pub provider: String,
    pub line_type: String,
    pub geolocation: Geolocation,
    pub timezone: String,
}

/// Reference phone processor.
#[derive(Debug)]
pub struct PhoneProcessor<'a> {
    data: &'a ReferenceData,
}

impl<'a> PhoneProcessor<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    /// Operator for a number, `None` when the prefix is unknown.
    pub fn provider(&self, phone: &NormalizedPhone) -> Option<&'a str> {
        self.data.operator_for(&phone.national)
    }
}

impl PhoneAnalysis for PhoneProcessor<'_> {
    fn analyze_phone(&self, phone: Option<&str>) -> AnalyzerResult<PhoneReport> {
        let raw = phone
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AnalyzerError::rejected("Phone number required"))?;

        let normalized = normalize_phone(raw);
        let valid = normalized
            .as_ref()
            .is_some_and(|p| (10..=15).contains(&p.digits.len()));
        let provider = normalized
            .as_ref()
            .and_then(|p| self.provider(p))
            .unwrap_or(UNKNOWN_PROVIDER);

        Ok(PhoneReport {
            phone_number: raw.to_string(),
            normalized: normalized.map(|p| format!("+{}", p.international)),
            valid,
            provider: provider.to_string(),
            line_type: "Mobile".to_string(),
            geolocation: Geolocation {
                country: COUNTRY.to_string(),
                location: COUNTRY.to_string(),
            },
            timezone: TIMEZONE.to_string(),
        })
    }
}
