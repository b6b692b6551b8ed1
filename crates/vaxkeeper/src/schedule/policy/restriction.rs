use serde::Serialize;

use super::super::catalog::VaccineCatalog;
use super::super::domain::{join_codes, ScheduleError, VaccineCode};

/// Outcome of the mutual-exclusion check for a candidate vaccine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum RestrictionVerdict {
    Permitted {
        candidate: VaccineCode,
    },
    Conflict {
        candidate: VaccineCode,
        conflicting: Vec<VaccineCode>,
    },
}

impl RestrictionVerdict {
    pub fn allowed(&self) -> bool {
        matches!(self, RestrictionVerdict::Permitted { .. })
    }

    pub fn message(&self) -> String {
        match self {
            RestrictionVerdict::Permitted { candidate } => {
                format!("{candidate} has no conflicts with the recorded vaccines")
            }
            RestrictionVerdict::Conflict {
                candidate,
                conflicting,
            } => format!(
                "{candidate} cannot be given: conflicts with {} already on record",
                join_codes(conflicting)
            ),
        }
    }

    pub fn into_result(self) -> Result<(), ScheduleError> {
        match self {
            RestrictionVerdict::Permitted { .. } => Ok(()),
            RestrictionVerdict::Conflict {
                candidate,
                conflicting,
            } => Err(ScheduleError::RestrictionViolation {
                candidate,
                conflicting,
            }),
        }
    }
}

/// Applies the catalog's declared restriction sets. Symmetry is never inferred.
#[derive(Debug, Clone, Copy)]
pub struct RestrictionPolicy<'a> {
    catalog: &'a VaccineCatalog,
}

impl<'a> RestrictionPolicy<'a> {
    pub fn new(catalog: &'a VaccineCatalog) -> Self {
        Self { catalog }
    }

    pub fn can_combine<'c, I>(&self, candidate: &str, existing: I) -> RestrictionVerdict
    where
        I: IntoIterator<Item = &'c str>,
    {
        let restricted = self.catalog.restrictions_for(candidate);
        let mut conflicting: Vec<VaccineCode> = Vec::new();

        for code in existing {
            if restricted.contains(code) && !conflicting.iter().any(|seen| seen.as_str() == code) {
                conflicting.push(VaccineCode::new(code));
            }
        }

        let candidate = VaccineCode::new(candidate);
        if conflicting.is_empty() {
            RestrictionVerdict::Permitted { candidate }
        } else {
            RestrictionVerdict::Conflict {
                candidate,
                conflicting,
            }
        }
    }
}
