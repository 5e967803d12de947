//! Fraud detector for IMEIs and phone numbers.

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::capability::FraudScreening;
use crate::data::ReferenceData;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::phone::{normalize_phone, NormalizedPhone, PhoneProcessor};

/// International form of an Indonesian mobile number.
const MOBILE_PATTERN: &str = r"^628[1-9][0-9]{7,10}$";

/// Run length of a single digit treated as suspicious.
const REPEATED_DIGIT_RUN: usize = 6;

/// Coarse risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Result of `check_imei_indonesia`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImeiReport {
    pub imei: String,
    pub status: String,
    /// 15 digits with a valid Luhn check digit.
    pub luhn_valid: bool,
    pub blacklisted: bool,
    pub risk_level: RiskLevel,
    pub timestamp: DateTime<Utc>,
}

/// Result of `analyze_phone_fraud_deep`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneFraudReport {
    pub phone: String,
    pub status: String,
    pub reported: bool,
    /// Heuristics that fired, in evaluation order.
    pub signals: Vec<String>,
    pub risk_level: RiskLevel,
    pub timestamp: DateTime<Utc>,
}

/// Reference fraud detector.
#[derive(Debug)]
pub struct FraudDetector<'a> {
    data: &'a ReferenceData,
}

impl<'a> FraudDetector<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    fn phone_signals(&self, phone: &NormalizedPhone) -> AnalyzerResult<Vec<String>> {
        let mobile = Regex::new(MOBILE_PATTERN)
            .map_err(|e| AnalyzerError::fault(format!("invalid mobile pattern: {}", e)))?;

        let mut signals = Vec::new();
        if !(10..=15).contains(&phone.digits.len()) {
            signals.push("invalid_length".to_string());
        }
        if !mobile.is_match(&phone.international) {
            signals.push("non_mobile_format".to_string());
        }
        if PhoneProcessor::new(self.data).provider(phone).is_none() {
            signals.push("unknown_operator".to_string());
        }
        if longest_run(&phone.national) >= REPEATED_DIGIT_RUN {
            signals.push("repeated_digits".to_string());
        }
        Ok(signals)
    }
}

/// Luhn checksum over a string of ASCII digits.
pub fn luhn_valid(digits: &str) -> bool {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// Length of the longest run of one repeated character.
fn longest_run(s: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for c in s.chars() {
        current = if previous == Some(c) { current + 1 } else { 1 };
        previous = Some(c);
        longest = longest.max(current);
    }
    longest
}

impl FraudScreening for FraudDetector<'_> {
    fn check_imei_indonesia(&self, imei: Option<&str>) -> AnalyzerResult<ImeiReport> {
        let imei = imei
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .ok_or_else(|| AnalyzerError::rejected("IMEI required"))?;

        let digits: String = imei.chars().filter(char::is_ascii_digit).collect();
        let luhn_valid = digits.len() == 15 && luhn_valid(&digits);
        let blacklisted = self.data.is_imei_blacklisted(&digits);

        let risk_level = if blacklisted {
            RiskLevel::High
        } else if !luhn_valid {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        Ok(ImeiReport {
            imei: imei.to_string(),
            status: "checked".to_string(),
            luhn_valid,
            blacklisted,
            risk_level,
            timestamp: Utc::now(),
        })
    }

    fn analyze_phone_fraud_deep(&self, phone: Option<&str>) -> AnalyzerResult<PhoneFraudReport> {
        let raw = phone
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AnalyzerError::rejected("Phone number required"))?;

        let (reported, signals) = match normalize_phone(raw) {
            Some(normalized) => (
                self.data.is_phone_reported(&normalized.international),
                self.phone_signals(&normalized)?,
            ),
            None => (false, vec!["no_digits".to_string()]),
        };

        let risk_level = if reported {
            RiskLevel::High
        } else if !signals.is_empty() {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        Ok(PhoneFraudReport {
            phone: raw.to_string(),
            status: "checked".to_string(),
            reported,
            signals,
            risk_level,
            timestamp: Utc::now(),
        })
    }
}
