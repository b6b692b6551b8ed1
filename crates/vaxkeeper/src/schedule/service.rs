use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::age::{self, AgeProfile, BirthDate};
use super::catalog::VaccineCatalog;
use super::compensation::CompensationSchedule;
use super::domain::{AdministrationRecord, AgeCategory, DoseLabel, ScheduleError, VaccineCode};
use super::log::{AdministrationLog, LogEntry, RecordId};
use super::policy::{
    CandidateEvaluation, DoseIntervalPolicy, IntervalEnforcement, IntervalVerdict,
    RestrictionPolicy, SchedulerConfig,
};

/// What the nurse selected for the dose about to be given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrationRequest {
    pub age_category: AgeCategory,
    pub age_months: u32,
    pub code: VaccineCode,
    pub dose: DoseLabel,
    #[serde(default)]
    pub notes: String,
}

/// Facade composing the catalog, the catch-up schedule, and both policies
/// against a caller-owned administration log.
#[derive(Debug, Clone)]
pub struct VaccinationScheduler {
    catalog: Arc<VaccineCatalog>,
    compensation: CompensationSchedule,
    config: SchedulerConfig,
}

impl VaccinationScheduler {
    pub fn new(catalog: Arc<VaccineCatalog>, config: SchedulerConfig) -> Self {
        Self::with_compensation(catalog, CompensationSchedule::standard(), config)
    }

    pub fn with_compensation(
        catalog: Arc<VaccineCatalog>,
        compensation: CompensationSchedule,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            catalog,
            compensation,
            config,
        }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(VaccineCatalog::standard()), SchedulerConfig::default())
    }

    pub fn catalog(&self) -> &VaccineCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn classify_age(
        &self,
        birth: BirthDate,
        as_of: NaiveDate,
    ) -> Result<AgeProfile, ScheduleError> {
        age::classify(birth, as_of)
    }

    pub fn eligible_compensation_vaccines(&self, age_months: u32) -> Vec<VaccineCode> {
        self.compensation.eligible_for_compensation(age_months)
    }

    pub fn doses_for_vaccine(&self, code: &str) -> Result<Vec<DoseLabel>, ScheduleError> {
        self.catalog.doses_for(code).map(<[DoseLabel]>::to_vec)
    }

    /// Both verdicts for a candidate dose without touching the log.
    pub fn evaluate_candidate(
        &self,
        code: &str,
        dose: &DoseLabel,
        log: &AdministrationLog,
        today: NaiveDate,
    ) -> CandidateEvaluation {
        let restriction =
            RestrictionPolicy::new(&self.catalog).can_combine(code, log.existing_codes());
        let interval = DoseIntervalPolicy::new(&self.catalog).can_administer(
            code,
            log.last_dose_date(code),
            today,
        );

        if let IntervalVerdict::Unverifiable { raw, .. } = &interval {
            warn!(%code, %dose, raw = raw.as_str(), "previous dose date unreadable; interval not verified");
        }

        CandidateEvaluation {
            interval,
            restriction,
        }
    }

    /// Validate and append a new administration. The log is left untouched on any error.
    /// The returned entry carries the id to pass to `delete_administration`.
    pub fn record_administration(
        &self,
        request: AdministrationRequest,
        log: &mut AdministrationLog,
        today: NaiveDate,
    ) -> Result<LogEntry, ScheduleError> {
        let AdministrationRequest {
            age_category,
            age_months,
            code,
            dose,
            notes,
        } = request;

        let definition = self.catalog.definition(code.as_str())?;
        if !definition.has_dose(&dose) {
            return Err(ScheduleError::UnknownDoseLabel { code, dose });
        }

        if age_category == AgeCategory::Compensation
            && !self.compensation.is_eligible(code.as_str(), age_months)
        {
            return Err(ScheduleError::NotEligibleForCompensation { code, age_months });
        }

        let evaluation = self.evaluate_candidate(code.as_str(), &dose, log, today);

        if let Err(err) = evaluation.restriction.into_result() {
            warn!(%code, %dose, error = %err, "administration rejected by restriction rules");
            return Err(err);
        }

        match (
            self.config.interval_enforcement,
            evaluation.interval.into_result(),
        ) {
            (_, Ok(())) => {}
            (IntervalEnforcement::Advisory, Err(err)) => {
                warn!(%code, %dose, error = %err, "recording dose before minimum interval elapsed");
            }
            (IntervalEnforcement::Blocking, Err(err)) => {
                warn!(%code, %dose, error = %err, "administration rejected by interval rules");
                return Err(err);
            }
        }

        let record = AdministrationRecord::administered(
            today,
            definition.display_label(),
            dose,
            notes,
            age_category,
        );
        let id = log.append(record.clone());
        info!(
            %id,
            label = record.vaccine_label(),
            dose = %record.dose_label(),
            category = age_category.key(),
            "administration recorded"
        );

        Ok(LogEntry { id, record })
    }

    pub fn delete_administration(
        &self,
        log: &mut AdministrationLog,
        id: RecordId,
    ) -> Result<AdministrationRecord, ScheduleError> {
        let removed = log.delete(id)?;
        info!(%id, label = removed.vaccine_label(), "administration deleted");
        Ok(removed)
    }
}

impl Default for VaccinationScheduler {
    fn default() -> Self {
        Self::standard()
    }
}
