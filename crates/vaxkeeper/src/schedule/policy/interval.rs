use chrono::NaiveDate;
use serde::Serialize;

use super::super::catalog::VaccineCatalog;
use super::super::domain::{parse_iso_date, ScheduleError, VaccineCode};

/// Outcome of the minimum-spacing check for one vaccine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum IntervalVerdict {
    FirstDose {
        code: VaccineCode,
    },
    Elapsed {
        code: VaccineCode,
        days_passed: i64,
        required: u32,
    },
    TooSoon {
        code: VaccineCode,
        days_passed: i64,
        required: u32,
        days_remaining: i64,
    },
    /// The previous dose date could not be read; treated as permitted.
    Unverifiable {
        code: VaccineCode,
        raw: String,
    },
}

impl IntervalVerdict {
    pub fn allowed(&self) -> bool {
        !matches!(self, IntervalVerdict::TooSoon { .. })
    }

    pub fn days_passed(&self) -> Option<i64> {
        match self {
            IntervalVerdict::Elapsed { days_passed, .. }
            | IntervalVerdict::TooSoon { days_passed, .. } => Some(*days_passed),
            IntervalVerdict::FirstDose { .. } | IntervalVerdict::Unverifiable { .. } => None,
        }
    }

    pub fn days_remaining(&self) -> Option<i64> {
        match self {
            IntervalVerdict::TooSoon { days_remaining, .. } => Some(*days_remaining),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            IntervalVerdict::FirstDose { code } => {
                format!("no earlier {code} dose on record; first dose may be given")
            }
            IntervalVerdict::Elapsed {
                code,
                days_passed,
                required,
            } => format!(
                "{days_passed} day(s) since the last {code} dose (minimum {required}); dose may be given"
            ),
            IntervalVerdict::TooSoon {
                code,
                days_passed,
                required,
                days_remaining,
            } => format!(
                "only {days_passed} day(s) since the last {code} dose; wait {days_remaining} more day(s) (minimum {required})"
            ),
            IntervalVerdict::Unverifiable { code, raw } => format!(
                "last {code} dose date '{raw}' is unreadable; interval could not be verified"
            ),
        }
    }

    pub fn into_result(self) -> Result<(), ScheduleError> {
        match self {
            IntervalVerdict::TooSoon {
                code,
                days_passed,
                required,
                days_remaining,
            } => Err(ScheduleError::IntervalNotElapsed {
                code,
                days_passed,
                required,
                days_remaining,
            }),
            _ => Ok(()),
        }
    }
}

/// Checks the minimum number of days between consecutive doses of a vaccine.
#[derive(Debug, Clone, Copy)]
pub struct DoseIntervalPolicy<'a> {
    catalog: &'a VaccineCatalog,
}

impl<'a> DoseIntervalPolicy<'a> {
    pub fn new(catalog: &'a VaccineCatalog) -> Self {
        Self { catalog }
    }

    pub fn can_administer(
        &self,
        code: &str,
        last_dose_date: Option<&str>,
        today: NaiveDate,
    ) -> IntervalVerdict {
        let code_key = VaccineCode::new(code);
        let Some(raw) = last_dose_date else {
            return IntervalVerdict::FirstDose { code: code_key };
        };

        let last = match parse_iso_date(raw) {
            Ok(date) => date,
            Err(_) => {
                return IntervalVerdict::Unverifiable {
                    code: code_key,
                    raw: raw.to_string(),
                }
            }
        };

        let days_passed = (today - last).num_days();
        let required = self.catalog.interval_days(code);

        if days_passed >= i64::from(required) {
            IntervalVerdict::Elapsed {
                code: code_key,
                days_passed,
                required,
            }
        } else {
            IntervalVerdict::TooSoon {
                code: code_key,
                days_passed,
                required,
                days_remaining: i64::from(required) - days_passed,
            }
        }
    }
}
