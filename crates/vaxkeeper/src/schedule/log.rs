use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{AdministrationRecord, ScheduleError};

/// Session-local handle for a record inside one log. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(u64);

impl RecordId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: RecordId,
    pub record: AdministrationRecord,
}

/// Ordered administration history for a single child.
///
/// Supports append and delete-by-identity only; stored records are never edited.
/// Serializes as the plain list of records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    from = "Vec<AdministrationRecord>",
    into = "Vec<AdministrationRecord>"
)]
pub struct AdministrationLog {
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl AdministrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<AdministrationRecord>) -> Self {
        let mut log = Self::new();
        for record in records {
            log.append(record);
        }
        log
    }

    pub fn append(&mut self, record: AdministrationRecord) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.entries.push(LogEntry { id, record });
        id
    }

    pub fn delete(&mut self, id: RecordId) -> Result<AdministrationRecord, ScheduleError> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(ScheduleError::RecordNotFound(id))?;
        Ok(self.entries.remove(position).record)
    }

    pub fn get(&self, id: RecordId) -> Option<&AdministrationRecord> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.record)
    }

    /// Id of the record shown at 1-based `position` in insertion order.
    pub fn id_at(&self, position: usize) -> Result<RecordId, ScheduleError> {
        position
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .map(|entry| entry.id)
            .ok_or(ScheduleError::NoRecordAtPosition(position))
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Records in insertion order.
    pub fn records(&self) -> Vec<&AdministrationRecord> {
        self.entries.iter().map(|entry| &entry.record).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct vaccine codes on record, in first-seen order.
    pub fn existing_codes(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .map(|entry| entry.record.vaccine_code())
            .filter(|code| seen.insert(*code))
            .collect()
    }

    pub fn records_for(&self, code: &str) -> Vec<&AdministrationRecord> {
        self.entries
            .iter()
            .map(|entry| &entry.record)
            .filter(|record| record.vaccine_code() == code)
            .collect()
    }

    /// Latest dose date for `code`, compared as calendar dates. An unreadable
    /// stored date is returned only when no dose for `code` has a readable one.
    pub fn last_dose_date(&self, code: &str) -> Option<&str> {
        let records = self.records_for(code);
        records
            .iter()
            .copied()
            .filter_map(|record| record.parsed_date().map(|date| (date, record.date())))
            .max_by_key(|(date, _)| *date)
            .map(|(_, raw)| raw)
            .or_else(|| records.iter().copied().map(AdministrationRecord::date).max())
    }
}

impl From<Vec<AdministrationRecord>> for AdministrationLog {
    fn from(records: Vec<AdministrationRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<AdministrationLog> for Vec<AdministrationRecord> {
    fn from(log: AdministrationLog) -> Self {
        log.entries.into_iter().map(|entry| entry.record).collect()
    }
}
