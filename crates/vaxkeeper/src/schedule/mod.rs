//! Vaccination eligibility and scheduling rules.
//!
//! Everything here is synchronous and free of I/O apart from the history
//! importer's reader. The catalog and compensation schedule are immutable
//! values; the only mutable state is the caller-owned [`AdministrationLog`].

pub mod age;
pub mod catalog;
pub mod child;
pub mod compensation;
pub mod domain;
pub mod history;
pub mod log;
pub mod policy;
pub mod service;

#[cfg(test)]
mod tests;

pub use age::{AgeProfile, BirthDate, ExactAge};
pub use catalog::{VaccineCatalog, VaccineDefinition, DEFAULT_INTERVAL_DAYS};
pub use child::ChildRecord;
pub use compensation::{CompensationGroup, CompensationSchedule};
pub use domain::{
    AdministrationRecord, AdministrationStatus, AgeCategory, DoseLabel, ScheduleError,
    VaccineCode,
};
pub use history::{HistoryImportError, HistoryImporter};
pub use log::{AdministrationLog, LogEntry, RecordId};
pub use policy::{
    CandidateEvaluation, DoseIntervalPolicy, IntervalEnforcement, IntervalVerdict,
    RestrictionPolicy, RestrictionVerdict, SchedulerConfig,
};
pub use service::{AdministrationRequest, VaccinationScheduler};
