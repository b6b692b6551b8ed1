use serde::{Deserialize, Serialize};

/// Whether a dose-interval shortfall blocks recording or is only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalEnforcement {
    #[default]
    Advisory,
    Blocking,
}

impl IntervalEnforcement {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "advisory" | "warn" => Some(Self::Advisory),
            "blocking" | "block" | "enforce" => Some(Self::Blocking),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Advisory => "advisory",
            Self::Blocking => "blocking",
        }
    }
}

/// Rule dials applied by the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub interval_enforcement: IntervalEnforcement,
}
