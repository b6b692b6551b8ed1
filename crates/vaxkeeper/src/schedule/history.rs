use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use super::age::{self, BirthDate};
use super::catalog::VaccineCatalog;
use super::domain::{
    format_iso_date, parse_iso_date, AdministrationRecord, AgeCategory, DoseLabel,
};

#[derive(Debug)]
pub enum HistoryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownAgeCategory { row: usize, value: String },
    MissingAgeCategory { row: usize },
}

impl std::fmt::Display for HistoryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryImportError::Io(err) => write!(f, "failed to read history export: {}", err),
            HistoryImportError::Csv(err) => write!(f, "invalid history CSV data: {}", err),
            HistoryImportError::UnknownAgeCategory { row, value } => {
                write!(f, "row {}: unknown age category '{}'", row, value)
            }
            HistoryImportError::MissingAgeCategory { row } => write!(
                f,
                "row {}: age category missing and cannot be derived from the dose date",
                row
            ),
        }
    }
}

impl std::error::Error for HistoryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryImportError::Io(err) => Some(err),
            HistoryImportError::Csv(err) => Some(err),
            HistoryImportError::UnknownAgeCategory { .. }
            | HistoryImportError::MissingAgeCategory { .. } => None,
        }
    }
}

impl From<std::io::Error> for HistoryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for HistoryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads administrations kept in an older register (CSV with
/// `Date, Vaccine, Dose, Notes, Age Category` columns).
///
/// Dates are taken verbatim; a malformed date is imported as-is and later
/// treated as unverifiable by the interval check. A blank age category is
/// derived from the child's birth date when the dose date is readable.
pub struct HistoryImporter<'a> {
    catalog: &'a VaccineCatalog,
    birth_date: BirthDate,
}

impl<'a> HistoryImporter<'a> {
    pub fn new(catalog: &'a VaccineCatalog, birth_date: BirthDate) -> Self {
        Self {
            catalog,
            birth_date,
        }
    }

    pub fn import_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<AdministrationRecord>, HistoryImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    pub fn import_reader<R: Read>(
        &self,
        reader: R,
    ) -> Result<Vec<AdministrationRecord>, HistoryImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, row) in csv_reader.deserialize::<HistoryRow>().enumerate() {
            let row = row?;
            // header is line 1
            let line = index + 2;
            let record = self.record_from_row(row, line)?;
            if record.parsed_date().is_none() {
                warn!(
                    line,
                    date = record.date(),
                    label = record.vaccine_label(),
                    "imported dose with unreadable date"
                );
            }
            records.push(record);
        }

        info!(count = records.len(), "imported vaccination history");
        Ok(records)
    }

    fn record_from_row(
        &self,
        row: HistoryRow,
        line: usize,
    ) -> Result<AdministrationRecord, HistoryImportError> {
        let label = self.vaccine_label(&row.vaccine);
        let given_on = parse_iso_date(&row.date).ok();
        let age_category = match row.age_category.as_deref() {
            Some(value) => AgeCategory::from_key(value).ok_or_else(|| {
                HistoryImportError::UnknownAgeCategory {
                    row: line,
                    value: value.to_string(),
                }
            })?,
            None => given_on
                .and_then(|date| age::age_category(self.birth_date, date).ok())
                .ok_or(HistoryImportError::MissingAgeCategory { row: line })?,
        };

        // readable dates are stored zero-padded; anything else is kept as written
        let date = given_on.map(format_iso_date).unwrap_or(row.date);

        Ok(AdministrationRecord::historical(
            date,
            label,
            DoseLabel::new(row.dose),
            row.notes.unwrap_or_default(),
            age_category,
        ))
    }

    fn vaccine_label(&self, raw: &str) -> String {
        if raw.contains(" - ") {
            return raw.to_string();
        }

        self.catalog
            .display_label(raw)
            .unwrap_or_else(|_| raw.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Vaccine")]
    vaccine: String,
    #[serde(rename = "Dose")]
    dose: String,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
    #[serde(
        rename = "Age Category",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    age_category: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
