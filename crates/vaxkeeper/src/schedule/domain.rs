use std::borrow::Borrow;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::log::RecordId;

pub(crate) const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Catalog key for a vaccine, e.g. `M.M.R` or `Chicken pox`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaccineCode(String);

impl VaccineCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for VaccineCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VaccineCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for VaccineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stage within a vaccine regimen (`first`, `second`, `booster`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoseLabel(String);

impl DoseLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DoseLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for DoseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse age bracket used to group the vaccines due at a visit.
///
/// `Compensation` and `Booster` are explicit selections made at the visit and
/// are never derived from a birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeCategory {
    Newborn,
    Age2m,
    Age4m,
    Age6m,
    Age9m,
    Age12m,
    Age15m,
    Age18m,
    Age6y,
    Age12y,
    Age15y,
    Compensation,
    Booster,
}

impl AgeCategory {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::Newborn,
            Self::Age2m,
            Self::Age4m,
            Self::Age6m,
            Self::Age9m,
            Self::Age12m,
            Self::Age15m,
            Self::Age18m,
            Self::Age6y,
            Self::Age12y,
            Self::Age15y,
            Self::Compensation,
            Self::Booster,
        ]
    }

    /// Wire name, identical to the serialized form.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Newborn => "newborn",
            Self::Age2m => "age2m",
            Self::Age4m => "age4m",
            Self::Age6m => "age6m",
            Self::Age9m => "age9m",
            Self::Age12m => "age12m",
            Self::Age15m => "age15m",
            Self::Age18m => "age18m",
            Self::Age6y => "age6y",
            Self::Age12y => "age12y",
            Self::Age15y => "age15y",
            Self::Compensation => "compensation",
            Self::Booster => "booster",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Newborn => "Newborn",
            Self::Age2m => "2 months",
            Self::Age4m => "4 months",
            Self::Age6m => "6 months",
            Self::Age9m => "9 months",
            Self::Age12m => "12 months",
            Self::Age15m => "15 months",
            Self::Age18m => "18 months",
            Self::Age6y => "6 years",
            Self::Age12y => "12 years",
            Self::Age15y => "15 years",
            Self::Compensation => "Compensation",
            Self::Booster => "Booster",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ordered()
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdministrationStatus {
    Complete,
}

impl AdministrationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Complete => "complete",
        }
    }
}

/// One administered dose as persisted in the child's file.
///
/// The date is kept as the raw `YYYY-MM-DD` text: imported history may carry
/// malformed dates and those must survive a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministrationRecord {
    date: String,
    vaccine_label: String,
    dose_label: DoseLabel,
    #[serde(default)]
    notes: String,
    status: AdministrationStatus,
    age_category: AgeCategory,
}

impl AdministrationRecord {
    pub(crate) fn administered(
        date: NaiveDate,
        vaccine_label: String,
        dose_label: DoseLabel,
        notes: String,
        age_category: AgeCategory,
    ) -> Self {
        Self {
            date: format_iso_date(date),
            vaccine_label,
            dose_label,
            notes,
            status: AdministrationStatus::Complete,
            age_category,
        }
    }

    /// Record taken over from an older register, date kept verbatim.
    pub fn historical(
        date: impl Into<String>,
        vaccine_label: impl Into<String>,
        dose_label: DoseLabel,
        notes: impl Into<String>,
        age_category: AgeCategory,
    ) -> Self {
        Self {
            date: date.into(),
            vaccine_label: vaccine_label.into(),
            dose_label,
            notes: notes.into(),
            status: AdministrationStatus::Complete,
            age_category,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date).ok()
    }

    pub fn vaccine_label(&self) -> &str {
        &self.vaccine_label
    }

    /// Code portion of `"<code> - <name>"`; the whole label when no name is attached.
    pub fn vaccine_code(&self) -> &str {
        self.vaccine_label
            .split_once(" - ")
            .map(|(code, _)| code)
            .unwrap_or(&self.vaccine_label)
            .trim()
    }

    pub fn dose_label(&self) -> &DoseLabel {
        &self.dose_label
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn status(&self) -> AdministrationStatus {
        self.status
    }

    pub fn age_category(&self) -> AgeCategory {
        self.age_category
    }
}

/// Errors raised by the scheduling rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: &'static str },
    #[error("unknown vaccine code '{0}'")]
    UnknownVaccineCode(VaccineCode),
    #[error("dose '{dose}' is not part of the {code} regimen")]
    UnknownDoseLabel { code: VaccineCode, dose: DoseLabel },
    #[error("{code} is not offered for compensation at {age_months} month(s) of age")]
    NotEligibleForCompensation { code: VaccineCode, age_months: u32 },
    #[error("{candidate} cannot be given together with {}", join_codes(.conflicting))]
    RestrictionViolation {
        candidate: VaccineCode,
        conflicting: Vec<VaccineCode>,
    },
    #[error("{code} was last given {days_passed} day(s) ago; {days_remaining} more day(s) required (minimum {required})")]
    IntervalNotElapsed {
        code: VaccineCode,
        days_passed: i64,
        required: u32,
        days_remaining: i64,
    },
    #[error("administration record {0} not found")]
    RecordNotFound(RecordId),
    #[error("no administration record at position {0}")]
    NoRecordAtPosition(usize),
}

pub(crate) fn join_codes(codes: &[VaccineCode]) -> String {
    codes
        .iter()
        .map(VaccineCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT).map_err(|_| {
        ScheduleError::InvalidDate {
            value: raw.to_string(),
            reason: "expected a real calendar date as YYYY-MM-DD",
        }
    })
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
