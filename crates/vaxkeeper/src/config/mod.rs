use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::schedule::{IntervalEnforcement, SchedulerConfig};

/// Distinguishes runtime behavior for different deployments of the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub scheduler: SchedulerConfig,
    pub catalog: CatalogConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("VAX_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let interval_enforcement = match env::var("VAX_INTERVAL_ENFORCEMENT") {
            Ok(raw) => IntervalEnforcement::parse(&raw)
                .ok_or(ConfigError::InvalidIntervalEnforcement { value: raw })?,
            Err(_) => IntervalEnforcement::default(),
        };

        let extra_definitions = env::var("VAX_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("VAX_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            scheduler: SchedulerConfig {
                interval_enforcement,
            },
            catalog: CatalogConfig { extra_definitions },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where to find custom vaccine definitions layered over the standard catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub extra_definitions: Option<PathBuf>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidIntervalEnforcement { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidIntervalEnforcement { value } => write!(
                f,
                "VAX_INTERVAL_ENFORCEMENT must be 'advisory' or 'blocking' (found '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
