use std::io::Cursor;

use crate::schedule::age::BirthDate;
use crate::schedule::catalog::VaccineCatalog;
use crate::schedule::domain::AgeCategory;
use crate::schedule::history::{HistoryImportError, HistoryImporter};

fn importer(catalog: &VaccineCatalog) -> HistoryImporter<'_> {
    HistoryImporter::new(catalog, BirthDate::new(2023, 6, 1).expect("valid birth"))
}

#[test]
fn expands_bare_codes_and_keeps_full_labels() {
    let catalog = VaccineCatalog::standard();
    let csv = "Date,Vaccine,Dose,Notes,Age Category\n\
               2023-06-02,B.C.G,single,,newborn\n\
               2023-08-05,\"HEXA - Hexavalent (DTaP-IPV-Hib-HepB)\",first,clinic A,age2m\n";

    let records = importer(&catalog)
        .import_reader(Cursor::new(csv))
        .expect("imports");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].vaccine_label(), "B.C.G - Bacillus Calmette-Guerin");
    assert_eq!(records[0].notes(), "");
    assert_eq!(records[1].vaccine_code(), "HEXA");
    assert_eq!(records[1].notes(), "clinic A");
    assert_eq!(records[1].age_category(), AgeCategory::Age2m);
}

#[test]
fn derives_missing_category_from_birth_date() {
    let catalog = VaccineCatalog::standard();
    let csv = "Date,Vaccine,Dose,Notes,Age Category\n\
               2024-06-10,M.M.R,first,,\n";

    let records = importer(&catalog)
        .import_reader(Cursor::new(csv))
        .expect("imports");

    assert_eq!(records[0].age_category(), AgeCategory::Age12m);
}

#[test]
fn keeps_malformed_dates_verbatim() {
    let catalog = VaccineCatalog::standard();
    let csv = "Date,Vaccine,Dose,Notes,Age Category\n\
               10/08/2023,ROTA,first,paper card,age2m\n";

    let records = importer(&catalog)
        .import_reader(Cursor::new(csv))
        .expect("imports");

    assert_eq!(records[0].date(), "10/08/2023");
    assert!(records[0].parsed_date().is_none());
}

#[test]
fn normalises_readable_dates_without_padding() {
    let catalog = VaccineCatalog::standard();
    let csv = "Date,Vaccine,Dose,Notes,Age Category\n\
               2023-8-5,ROTA,first,,\n";

    let records = importer(&catalog)
        .import_reader(Cursor::new(csv))
        .expect("imports");

    assert_eq!(records[0].date(), "2023-08-05");
    assert_eq!(records[0].age_category(), AgeCategory::Age2m);
}

#[test]
fn malformed_date_without_category_cannot_be_placed() {
    let catalog = VaccineCatalog::standard();
    let csv = "Date,Vaccine,Dose,Notes,Age Category\n\
               2023-06-02,B.C.G,single,,newborn\n\
               unknown,ROTA,first,,\n";

    match importer(&catalog).import_reader(Cursor::new(csv)) {
        Err(HistoryImportError::MissingAgeCategory { row }) => assert_eq!(row, 3),
        other => panic!("expected missing category error, got {other:?}"),
    }
}

#[test]
fn rejects_unknown_age_category() {
    let catalog = VaccineCatalog::standard();
    let csv = "Date,Vaccine,Dose,Notes,Age Category\n\
               2023-06-02,B.C.G,single,,toddler\n";

    match importer(&catalog).import_reader(Cursor::new(csv)) {
        Err(HistoryImportError::UnknownAgeCategory { row, value }) => {
            assert_eq!(row, 2);
            assert_eq!(value, "toddler");
        }
        other => panic!("expected unknown category error, got {other:?}"),
    }
}
