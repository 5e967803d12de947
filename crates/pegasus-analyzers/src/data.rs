//! Reference data shared by the analyzers.
//!
//! Built-in tables cover Indonesian province codes and mobile operator
//! prefixes. Optional data files extend them; they are read once at startup
//! and any unreadable or malformed file fails the load.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::phone::normalize_phone;

/// Province codes (first two NIK digits) and their names.
const PROVINCES: &[(&str, &str)] = &[
    ("11", "Aceh"),
    ("12", "Sumatera Utara"),
    ("13", "Sumatera Barat"),
    ("14", "Riau"),
    ("15", "Jambi"),
    ("16", "Sumatera Selatan"),
    ("17", "Bengkulu"),
    ("18", "Lampung"),
    ("19", "Kepulauan Bangka Belitung"),
    ("21", "Kepulauan Riau"),
    ("31", "DKI Jakarta"),
    ("32", "Jawa Barat"),
    ("33", "Jawa Tengah"),
    ("34", "DI Yogyakarta"),
    ("35", "Jawa Timur"),
    ("36", "Banten"),
    ("51", "Bali"),
    ("52", "Nusa Tenggara Barat"),
    ("53", "Nusa Tenggara Timur"),
    ("61", "Kalimantan Barat"),
    ("62", "Kalimantan Tengah"),
    ("63", "Kalimantan Selatan"),
    ("64", "Kalimantan Timur"),
    ("65", "Kalimantan Utara"),
    ("71", "Sulawesi Utara"),
    ("72", "Sulawesi Tengah"),
    ("73", "Sulawesi Selatan"),
    ("74", "Sulawesi Tenggara"),
    ("75", "Gorontalo"),
    ("76", "Sulawesi Barat"),
    ("81", "Maluku"),
    ("82", "Maluku Utara"),
    ("91", "Papua"),
    ("92", "Papua Barat"),
];

/// Operator prefixes, matched against the national number (no leading 0 or 62).
const OPERATORS: &[(&str, &[&str])] = &[
    ("Telkomsel", &["811", "812", "813", "821", "822", "823", "852", "853"]),
    ("Indosat Ooredoo", &["814", "815", "816", "855", "856", "857", "858"]),
    ("XL Axiata", &["817", "818", "819", "859", "877", "878"]),
    ("Axis", &["831", "832", "833", "838"]),
    ("Three (3)", &["895", "896", "897", "898", "899"]),
    (
        "Smartfren",
        &["881", "882", "883", "884", "885", "886", "887", "888", "889"],
    ),
];

/// Optional data files extending the built-in tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// TOML file with a `[provinces]` table of code → name.
    pub regions: Option<PathBuf>,
    /// TOML file with `[[operator]]` entries (`name`, `prefixes`).
    pub operators: Option<PathBuf>,
    /// Text file listing NIKs flagged in the SLIK OJK registry.
    pub slik_flagged: Option<PathBuf>,
    /// Text file listing blacklisted IMEIs.
    pub imei_blacklist: Option<PathBuf>,
    /// Text file listing phone numbers reported for fraud.
    pub reported_phones: Option<PathBuf>,
}

impl DataSources {
    /// Resolve relative paths against `base` (the config file's directory).
    pub fn resolve_against(&self, base: &Path) -> Self {
        let resolve = |path: &Option<PathBuf>| {
            path.as_ref().map(|p| if p.is_relative() { base.join(p) } else { p.clone() })
        };
        Self {
            regions: resolve(&self.regions),
            operators: resolve(&self.operators),
            slik_flagged: resolve(&self.slik_flagged),
            imei_blacklist: resolve(&self.imei_blacklist),
            reported_phones: resolve(&self.reported_phones),
        }
    }
}

/// An operator and the prefixes assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorPrefixes {
    pub name: String,
    pub prefixes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RegionsFile {
    #[serde(default)]
    provinces: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OperatorsFile {
    #[serde(default)]
    operator: Vec<OperatorPrefixes>,
}

/// Immutable reference tables.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    provinces: BTreeMap<String, String>,
    operators: Vec<OperatorPrefixes>,
    slik_flagged: BTreeSet<String>,
    imei_blacklist: BTreeSet<String>,
    reported_phones: BTreeSet<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceData {
    /// Built-in tables only.
    pub fn builtin() -> Self {
        Self {
            provinces: PROVINCES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
            operators: OPERATORS
                .iter()
                .map(|(name, prefixes)| OperatorPrefixes {
                    name: name.to_string(),
                    prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
                })
                .collect(),
            slik_flagged: BTreeSet::new(),
            imei_blacklist: BTreeSet::new(),
            reported_phones: BTreeSet::new(),
        }
    }

    /// Built-in tables extended with the given data files.
    ///
    /// Province entries from file override built-in names; operators from
    /// file are matched before the built-in ones.
    pub fn load(sources: &DataSources) -> Result<Self, LoadError> {
        let mut data = Self::builtin();

        if let Some(path) = &sources.regions {
            let file: RegionsFile = read_toml(path)?;
            data.provinces.extend(file.provinces);
        }

        if let Some(path) = &sources.operators {
            let file: OperatorsFile = read_toml(path)?;
            let mut operators = file.operator;
            operators.append(&mut data.operators);
            data.operators = operators;
        }

        if let Some(path) = &sources.slik_flagged {
            data.slik_flagged = read_list(path, |entry| {
                if entry.len() == 16 && entry.bytes().all(|b| b.is_ascii_digit()) {
                    Ok(entry.to_string())
                } else {
                    Err("NIK must be 16 digits".to_string())
                }
            })?;
        }

        if let Some(path) = &sources.imei_blacklist {
            data.imei_blacklist = read_list(path, |entry| {
                if !entry.is_empty() && entry.bytes().all(|b| b.is_ascii_digit()) {
                    Ok(entry.to_string())
                } else {
                    Err("IMEI must contain only digits".to_string())
                }
            })?;
        }

        if let Some(path) = &sources.reported_phones {
            data.reported_phones = read_list(path, |entry| {
                normalize_phone(entry)
                    .map(|phone| phone.international)
                    .ok_or_else(|| "phone number has no digits".to_string())
            })?;
        }

        Ok(data)
    }

    /// Province name for a two-digit code.
    pub fn province_name(&self, code: &str) -> Option<&str> {
        self.provinces.get(code).map(String::as_str)
    }

    /// Operator owning the prefix of a national number.
    pub fn operator_for(&self, national: &str) -> Option<&str> {
        self.operators
            .iter()
            .find(|op| op.prefixes.iter().any(|p| national.starts_with(p.as_str())))
            .map(|op| op.name.as_str())
    }

    /// Whether the NIK is flagged in the credit registry.
    pub fn is_slik_flagged(&self, nik: &str) -> bool {
        self.slik_flagged.contains(nik)
    }

    /// Whether the IMEI is blacklisted.
    pub fn is_imei_blacklisted(&self, imei: &str) -> bool {
        self.imei_blacklist.contains(imei)
    }

    /// Whether the phone (international digits, `62…`) has been reported.
    pub fn is_phone_reported(&self, international: &str) -> bool {
        self.reported_phones.contains(international)
    }

    /// Add registry-flagged NIKs.
    pub fn with_slik_flagged<I: IntoIterator<Item = String>>(mut self, niks: I) -> Self {
        self.slik_flagged.extend(niks);
        self
    }

    /// Add blacklisted IMEIs.
    pub fn with_imei_blacklist<I: IntoIterator<Item = String>>(mut self, imeis: I) -> Self {
        self.imei_blacklist.extend(imeis);
        self
    }

    /// Add reported phone numbers (any format).
    pub fn with_reported_phones<I: IntoIterator<Item = String>>(mut self, phones: I) -> Self {
        self.reported_phones
            .extend(phones.into_iter().filter_map(|p| normalize_phone(&p)).map(|p| p.international));
        self
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = read_file(path)?;
    toml::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a one-entry-per-line list. Blank lines and `#` comments are skipped.
fn read_list<F>(path: &Path, parse: F) -> Result<BTreeSet<String>, LoadError>
where
    F: Fn(&str) -> Result<String, String>,
{
    let content = read_file(path)?;
    let mut entries = BTreeSet::new();
    for (index, line) in content.lines().enumerate() {
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        let value = parse(entry).map_err(|reason| LoadError::Entry {
            path: path.to_path_buf(),
            line: index + 1,
            reason,
        })?;
        entries.insert(value);
    }
    Ok(entries)
}
