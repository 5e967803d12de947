//! NIK (Nomor Induk Kependudukan) processor.
//!
//! A NIK is 16 digits: province (2), regency/city (2), district (2), birth
//! date as DDMMYY with 40 added to the day for women, and a 4-digit serial.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::capability::NikAnalysis;
use crate::data::ReferenceData;
use crate::error::{AnalyzerError, AnalyzerResult};

/// Rejection message for anything that is not 16 digits.
pub const INVALID_NIK: &str = "Invalid NIK format (must be 16 digits)";

/// Name of the credit registry checked by `check_slik_ojk`.
pub const SLIK_REGISTRY: &str = "SLIK OJK";

/// Offset added to the birth day for female holders.
const FEMALE_DAY_OFFSET: u32 = 40;

/// Two-digit years above this belong to the 1900s.
const CENTURY_PIVOT: u32 = 30;

/// Result of `parse_nik`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NikReport {
    pub nik: String,
    pub provinsi: String,
    pub kabupaten_kota: String,
    pub kecamatan: String,
    pub gender: String,
    /// Birth date as `DD-MM-YYYY`.
    pub tanggal_lahir: String,
    pub unique_id: String,
    /// Whether the encoded birth date exists in the calendar.
    pub valid_birth_date: bool,
}

/// Result of `check_slik_ojk`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlikReport {
    pub nik: String,
    pub registry: String,
    pub flagged: bool,
    pub status: String,
    pub checked_at: DateTime<Utc>,
}

/// Reference NIK processor.
#[derive(Debug)]
pub struct NikProcessor<'a> {
    data: &'a ReferenceData,
}

impl<'a> NikProcessor<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }
}

/// Trim and check the 16-digit shape.
fn validated(nik: Option<&str>) -> AnalyzerResult<&str> {
    let nik = nik.map(str::trim).unwrap_or_default();
    if nik.len() == 16 && nik.bytes().all(|b| b.is_ascii_digit()) {
        Ok(nik)
    } else {
        Err(AnalyzerError::rejected(INVALID_NIK))
    }
}

/// Parse a run of ASCII digits already known to be valid.
fn number(digits: &str) -> AnalyzerResult<u32> {
    digits
        .parse()
        .map_err(|e| AnalyzerError::fault(format!("failed to read NIK digits '{}': {}", digits, e)))
}

impl NikAnalysis for NikProcessor<'_> {
    fn parse_nik(&self, nik: Option<&str>) -> AnalyzerResult<NikReport> {
        let nik = validated(nik)?;

        let province_code = &nik[0..2];
        let city_code = &nik[2..4];
        let district_code = &nik[4..6];

        let mut day = number(&nik[6..8])?;
        let month = number(&nik[8..10])?;
        let year = number(&nik[10..12])?;

        let gender = if day > FEMALE_DAY_OFFSET {
            day -= FEMALE_DAY_OFFSET;
            "Female"
        } else {
            "Male"
        };
        let full_year = if year > CENTURY_PIVOT { 1900 + year } else { 2000 + year };
        let valid_birth_date = NaiveDate::from_ymd_opt(full_year as i32, month, day).is_some();

        let provinsi = match self.data.province_name(province_code) {
            Some(name) => name.to_string(),
            None => format!("Province Code: {}", province_code),
        };

        Ok(NikReport {
            nik: nik.to_string(),
            provinsi,
            kabupaten_kota: format!("City Code: {}", city_code),
            kecamatan: format!("District Code: {}", district_code),
            gender: gender.to_string(),
            tanggal_lahir: format!("{:02}-{:02}-{}", day, month, full_year),
            unique_id: nik[12..16].to_string(),
            valid_birth_date,
        })
    }

    fn check_slik_ojk(&self, nik: Option<&str>) -> AnalyzerResult<SlikReport> {
        let nik = validated(nik)?;
        let flagged = self.data.is_slik_flagged(nik);
        Ok(SlikReport {
            nik: nik.to_string(),
            registry: SLIK_REGISTRY.to_string(),
            flagged,
            status: if flagged { "flagged" } else { "clear" }.to_string(),
            checked_at: Utc::now(),
        })
    }
}
