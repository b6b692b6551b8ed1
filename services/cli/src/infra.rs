use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vaxkeeper::config::AppConfig;
use vaxkeeper::error::AppError;
use vaxkeeper::schedule::domain::parse_iso_date;
use vaxkeeper::schedule::{
    AgeCategory, BirthDate, ChildRecord, VaccinationScheduler, VaccineCatalog, VaccineDefinition,
};

pub(crate) fn build_scheduler(config: &AppConfig) -> Result<VaccinationScheduler, AppError> {
    let standard = VaccineCatalog::standard();
    let catalog = match &config.catalog.extra_definitions {
        Some(path) => {
            let extra: Vec<VaccineDefinition> = serde_json::from_str(&fs::read_to_string(path)?)?;
            info!(path = %path.display(), count = extra.len(), "loaded custom vaccine definitions");
            standard.extended_with(extra)
        }
        None => standard,
    };

    Ok(VaccinationScheduler::new(
        Arc::new(catalog),
        config.scheduler.clone(),
    ))
}

pub(crate) fn load_child(path: &Path) -> Result<ChildRecord, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn save_child(path: &Path, child: &ChildRecord) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(child)?;
    fs::write(path, json)?;
    Ok(())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_iso_date(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_birth_date(raw: &str) -> Result<BirthDate, String> {
    BirthDate::parse(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_category(raw: &str) -> Result<AgeCategory, String> {
    AgeCategory::from_key(raw).ok_or_else(|| {
        let known: Vec<&str> = AgeCategory::ordered()
            .into_iter()
            .map(AgeCategory::key)
            .collect();
        format!("unknown age category '{raw}' (expected one of {})", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_shares_library_date_rules() {
        assert_eq!(
            parse_date(" 2024-03-15 "),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"))
        );
        let err = parse_date("2024-02-30").expect_err("not a calendar date");
        assert!(err.contains("2024-02-30"));
        assert!(err.contains("YYYY-MM-DD"));
    }

    #[test]
    fn parse_category_lists_known_keys_on_error() {
        assert_eq!(parse_category("age2m"), Ok(AgeCategory::Age2m));
        let err = parse_category("toddler").expect_err("unknown key");
        assert!(err.contains("newborn"));
    }
}
