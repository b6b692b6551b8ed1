use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::age::{self, AgeProfile, BirthDate};
use super::domain::ScheduleError;
use super::log::AdministrationLog;

/// Child file as stored by the form layer. Personal fields are carried as entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRecord {
    pub name: String,
    pub father_name: String,
    pub grandfather_name: String,
    pub surname: String,
    pub mother_name: String,
    pub birth_date: BirthDate,
    pub gender: String,
    pub nationality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_paper_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub vaccinations: AdministrationLog,
}

impl ChildRecord {
    pub fn full_name(&self) -> String {
        [
            self.name.as_str(),
            self.father_name.as_str(),
            self.grandfather_name.as_str(),
            self.surname.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn age_profile(&self, as_of: NaiveDate) -> Result<AgeProfile, ScheduleError> {
        age::classify(self.birth_date, as_of)
    }
}
