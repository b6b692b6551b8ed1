mod config;
mod interval;
mod restriction;

pub use config::{IntervalEnforcement, SchedulerConfig};
pub use interval::{DoseIntervalPolicy, IntervalVerdict};
pub use restriction::{RestrictionPolicy, RestrictionVerdict};

use serde::Serialize;

/// Both verdicts for a candidate dose, as shown to the nurse before saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateEvaluation {
    pub interval: IntervalVerdict,
    pub restriction: RestrictionVerdict,
}

impl CandidateEvaluation {
    /// True when the record would be accepted under advisory interval handling.
    pub fn can_record(&self) -> bool {
        self.restriction.allowed()
    }

    pub fn messages(&self) -> Vec<String> {
        vec![self.restriction.message(), self.interval.message()]
    }
}
