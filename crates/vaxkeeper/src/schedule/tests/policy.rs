use super::common::*;
use crate::schedule::catalog::{VaccineCatalog, VaccineDefinition};
use crate::schedule::domain::{ScheduleError, VaccineCode};
use crate::schedule::policy::{
    DoseIntervalPolicy, IntervalVerdict, RestrictionPolicy, RestrictionVerdict,
};

#[test]
fn rotavirus_dose_too_soon_reports_remaining_days() {
    let catalog = VaccineCatalog::standard();
    let policy = DoseIntervalPolicy::new(&catalog);

    let verdict = policy.can_administer("ROTA", Some("2024-01-01"), date(2024, 1, 20));

    assert!(!verdict.allowed());
    assert_eq!(verdict.days_passed(), Some(19));
    assert_eq!(verdict.days_remaining(), Some(9));
    assert!(verdict.message().contains("9 more day"));
    match verdict.into_result() {
        Err(ScheduleError::IntervalNotElapsed {
            required,
            days_remaining,
            ..
        }) => {
            assert_eq!(required, 28);
            assert_eq!(days_remaining, 9);
        }
        other => panic!("expected interval error, got {other:?}"),
    }
}

#[test]
fn dose_allowed_once_interval_is_reached() {
    let catalog = VaccineCatalog::standard();
    let policy = DoseIntervalPolicy::new(&catalog);

    let verdict = policy.can_administer("ROTA", Some("2024-01-01"), date(2024, 1, 29));

    assert_eq!(
        verdict,
        IntervalVerdict::Elapsed {
            code: VaccineCode::from("ROTA"),
            days_passed: 28,
            required: 28,
        }
    );
    assert!(verdict.allowed());
}

#[test]
fn first_dose_is_always_allowed() {
    let catalog = VaccineCatalog::standard();
    let policy = DoseIntervalPolicy::new(&catalog);

    for definition in catalog.definitions() {
        let verdict = policy.can_administer(definition.code.as_str(), None, date(2025, 1, 1));
        assert!(
            matches!(verdict, IntervalVerdict::FirstDose { .. }),
            "{} first dose blocked",
            definition.code
        );
        assert!(verdict.allowed());
    }
}

#[test]
fn unreadable_history_date_is_permitted() {
    let catalog = VaccineCatalog::standard();
    let policy = DoseIntervalPolicy::new(&catalog);

    let verdict = policy.can_administer("HEXA", Some("15/03/2024"), date(2024, 3, 20));

    assert!(verdict.allowed());
    assert_eq!(verdict.days_passed(), None);
    assert!(matches!(verdict, IntervalVerdict::Unverifiable { ref raw, .. } if raw == "15/03/2024"));
    assert!(verdict.into_result().is_ok());
}

#[test]
fn unknown_codes_use_default_interval() {
    let catalog = VaccineCatalog::standard();
    let policy = DoseIntervalPolicy::new(&catalog);

    let verdict = policy.can_administer("LOCAL.X", Some("2025-01-01"), date(2025, 1, 21));

    assert_eq!(verdict.days_remaining(), Some(1));
}

#[test]
fn measles_on_record_blocks_chicken_pox() {
    let catalog = VaccineCatalog::standard();
    let policy = RestrictionPolicy::new(&catalog);

    let verdict = policy.can_combine("Chicken pox", ["B.C.G", "M.M.R"]);

    assert_eq!(
        verdict,
        RestrictionVerdict::Conflict {
            candidate: VaccineCode::from("Chicken pox"),
            conflicting: vec![VaccineCode::from("M.M.R")],
        }
    );
    assert!(verdict.message().contains("M.M.R"));
}

#[test]
fn restriction_check_is_symmetric_for_standard_catalog() {
    let catalog = VaccineCatalog::standard();
    let policy = RestrictionPolicy::new(&catalog);

    for definition in catalog.definitions() {
        for restricted in &definition.restrictions {
            let forward = policy.can_combine(restricted.as_str(), [definition.code.as_str()]);
            let backward = policy.can_combine(definition.code.as_str(), [restricted.as_str()]);
            assert!(!forward.allowed(), "{restricted} allowed after {}", definition.code);
            assert!(!backward.allowed(), "{} allowed after {restricted}", definition.code);
        }
    }
}

#[test]
fn undeclared_reverse_restriction_is_not_inferred() {
    let catalog = VaccineCatalog::from_definitions(vec![
        VaccineDefinition::new("A", "Alpha", &["single"]).restricting(&["B"]),
        VaccineDefinition::new("B", "Beta", &["single"]),
    ]);
    let policy = RestrictionPolicy::new(&catalog);

    assert!(!policy.can_combine("A", ["B"]).allowed());
    assert!(policy.can_combine("B", ["A"]).allowed());
}

#[test]
fn no_declared_restriction_means_permitted() {
    let catalog = VaccineCatalog::standard();
    let policy = RestrictionPolicy::new(&catalog);

    let verdict = policy.can_combine("HEXA", ["M.M.R", "Chicken pox"]);

    assert!(verdict.allowed());
    assert!(verdict.into_result().is_ok());
}
