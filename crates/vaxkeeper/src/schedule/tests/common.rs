use std::sync::Arc;

use chrono::NaiveDate;

use crate::schedule::domain::{AdministrationRecord, AgeCategory, DoseLabel, VaccineCode};
use crate::schedule::policy::{IntervalEnforcement, SchedulerConfig};
use crate::schedule::service::{AdministrationRequest, VaccinationScheduler};
use crate::schedule::{AdministrationLog, VaccineCatalog};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn scheduler() -> VaccinationScheduler {
    VaccinationScheduler::standard()
}

pub(super) fn blocking_scheduler() -> VaccinationScheduler {
    VaccinationScheduler::new(
        Arc::new(VaccineCatalog::standard()),
        SchedulerConfig {
            interval_enforcement: IntervalEnforcement::Blocking,
        },
    )
}

pub(super) fn given(raw_date: &str, label: &str, dose: &str) -> AdministrationRecord {
    AdministrationRecord::historical(
        raw_date,
        label,
        DoseLabel::from(dose),
        "",
        AgeCategory::Age12m,
    )
}

pub(super) fn log_with(records: Vec<AdministrationRecord>) -> AdministrationLog {
    AdministrationLog::from_records(records)
}

pub(super) fn request(
    category: AgeCategory,
    age_months: u32,
    code: &str,
    dose: &str,
) -> AdministrationRequest {
    AdministrationRequest {
        age_category: category,
        age_months,
        code: VaccineCode::from(code),
        dose: DoseLabel::from(dose),
        notes: String::new(),
    }
}
