use super::common::*;
use crate::schedule::domain::ScheduleError;
use crate::schedule::log::AdministrationLog;

#[test]
fn append_then_delete_restores_previous_records() {
    let mut log = log_with(vec![
        given("2024-01-01", "B.C.G - Bacillus Calmette-Guerin", "single"),
        given("2024-03-01", "HEXA - Hexavalent (DTaP-IPV-Hib-HepB)", "first"),
    ]);
    let before: Vec<_> = log.records().into_iter().cloned().collect();

    let id = log.append(given("2024-04-01", "ROTA - Rotavirus", "first"));
    assert_eq!(log.len(), 3);
    let removed = log.delete(id).expect("record deleted");

    assert_eq!(removed.vaccine_code(), "ROTA");
    let after: Vec<_> = log.records().into_iter().cloned().collect();
    assert_eq!(after, before);
}

#[test]
fn deleting_middle_record_keeps_order_of_the_rest() {
    let mut log = AdministrationLog::new();
    let first = log.append(given("2024-01-01", "B.C.G - Bacillus Calmette-Guerin", "single"));
    let second = log.append(given("2024-01-02", "Hep.B - Hepatitis B", "first"));
    let third = log.append(given("2024-01-03", "O.P.V - Oral Polio Vaccine", "zero"));

    log.delete(second).expect("deleted");

    let ids: Vec<_> = log.entries().iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![first, third]);
    assert!(log.get(second).is_none());
}

#[test]
fn deleting_unknown_identity_is_an_error() {
    let mut log = AdministrationLog::new();
    let id = log.append(given("2024-01-01", "B.C.G - Bacillus Calmette-Guerin", "single"));
    log.delete(id).expect("deleted once");

    assert!(matches!(
        log.delete(id),
        Err(ScheduleError::RecordNotFound(missing)) if missing == id
    ));
    assert!(log.is_empty());
}

#[test]
fn listing_position_resolves_to_record_identity() {
    let mut log = AdministrationLog::new();
    log.append(given("2024-01-01", "B.C.G - Bacillus Calmette-Guerin", "single"));
    let second = log.append(given("2024-01-02", "Hep.B - Hepatitis B", "first"));

    assert_eq!(log.id_at(2).expect("second row"), second);
    assert!(matches!(log.id_at(0), Err(ScheduleError::NoRecordAtPosition(0))));
    assert!(matches!(log.id_at(3), Err(ScheduleError::NoRecordAtPosition(3))));
}

#[test]
fn identities_are_not_reused_after_delete() {
    let mut log = AdministrationLog::new();
    let first = log.append(given("2024-01-01", "B.C.G - Bacillus Calmette-Guerin", "single"));
    log.delete(first).expect("deleted");
    let second = log.append(given("2024-01-01", "B.C.G - Bacillus Calmette-Guerin", "single"));

    assert_ne!(first, second);
}

#[test]
fn last_dose_date_uses_latest_date_not_insertion_order() {
    let log = log_with(vec![
        given("2024-02-10", "ROTA - Rotavirus", "second"),
        given("2024-01-05", "ROTA - Rotavirus", "first"),
        given("2024-03-01", "HEXA - Hexavalent (DTaP-IPV-Hib-HepB)", "first"),
    ]);

    assert_eq!(log.last_dose_date("ROTA"), Some("2024-02-10"));
    assert_eq!(log.last_dose_date("PCV.13"), None);
    assert_eq!(log.records_for("ROTA").len(), 2);
}

#[test]
fn last_dose_date_compares_calendar_dates_not_text() {
    let log = log_with(vec![
        given("2024-1-5", "ROTA - Rotavirus", "first"),
        given("2024-01-20", "ROTA - Rotavirus", "second"),
    ]);

    assert_eq!(log.last_dose_date("ROTA"), Some("2024-01-20"));
}

#[test]
fn unreadable_date_is_reported_only_without_a_readable_one() {
    let mixed = log_with(vec![
        given("2024-01-20", "ROTA - Rotavirus", "first"),
        given("unknown", "ROTA - Rotavirus", "second"),
    ]);
    assert_eq!(mixed.last_dose_date("ROTA"), Some("2024-01-20"));

    let unreadable = log_with(vec![given("unknown", "ROTA - Rotavirus", "first")]);
    assert_eq!(unreadable.last_dose_date("ROTA"), Some("unknown"));
}

#[test]
fn existing_codes_are_distinct_and_accept_bare_codes() {
    let log = log_with(vec![
        given("2024-01-05", "ROTA - Rotavirus", "first"),
        given("2024-02-10", "ROTA - Rotavirus", "second"),
        given("2023-12-01", "M.M.R", "first"),
    ]);

    assert_eq!(log.existing_codes(), vec!["ROTA", "M.M.R"]);
}

#[test]
fn serializes_as_plain_record_list() {
    let log = log_with(vec![given("2024-01-05", "ROTA - Rotavirus", "first")]);

    let json = serde_json::to_value(&log).expect("serializes");

    assert_eq!(
        json,
        serde_json::json!([{
            "date": "2024-01-05",
            "vaccineLabel": "ROTA - Rotavirus",
            "doseLabel": "first",
            "notes": "",
            "status": "complete",
            "ageCategory": "age12m"
        }])
    );

    let restored: AdministrationLog = serde_json::from_value(json).expect("deserializes");
    assert_eq!(restored.records(), log.records());
}
