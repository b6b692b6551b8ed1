use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{parse_iso_date, AgeCategory, ScheduleError};

/// Upper bounds (exclusive, in whole months) for each age-derived category.
const CATEGORY_THRESHOLDS: [(u32, AgeCategory); 10] = [
    (2, AgeCategory::Newborn),
    (4, AgeCategory::Age2m),
    (6, AgeCategory::Age4m),
    (9, AgeCategory::Age6m),
    (12, AgeCategory::Age9m),
    (15, AgeCategory::Age12m),
    (18, AgeCategory::Age15m),
    (24, AgeCategory::Age18m),
    (72, AgeCategory::Age6y),
    (144, AgeCategory::Age12y),
];

/// A child's date of birth. Always a real calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ScheduleError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ScheduleError::InvalidDate {
                value: format!("{year:04}-{month:02}-{day:02}"),
                reason: "not a real calendar date",
            })
    }

    pub fn parse(raw: &str) -> Result<Self, ScheduleError> {
        parse_iso_date(raw).map(Self)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

/// Calendar difference between a birth date and an as-of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactAge {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl ExactAge {
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

/// Age snapshot handed to the form: category plus the exact age it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeProfile {
    pub category: AgeCategory,
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub total_months: u32,
}

pub fn exact_age(birth: BirthDate, as_of: NaiveDate) -> Result<ExactAge, ScheduleError> {
    let born = birth.date();
    if born > as_of {
        return Err(ScheduleError::InvalidDate {
            value: born.to_string(),
            reason: "birth date is after the reference date",
        });
    }

    let mut years = as_of.year() - born.year();
    let mut months = as_of.month() as i32 - born.month() as i32;
    let mut days = as_of.day() as i32 - born.day() as i32;

    // Borrow whole calendar months walking backwards from the as-of month.
    let mut borrow_from = first_of_month(as_of);
    while days < 0 {
        let previous = borrow_from.pred_opt().ok_or(ScheduleError::InvalidDate {
            value: as_of.to_string(),
            reason: "reference date out of range",
        })?;
        days += previous.day() as i32;
        months -= 1;
        borrow_from = first_of_month(previous);
    }

    while months < 0 {
        months += 12;
        years -= 1;
    }

    Ok(ExactAge {
        years: years as u32,
        months: months as u32,
        days: days as u32,
    })
}

pub fn category_for_months(total_months: u32) -> AgeCategory {
    CATEGORY_THRESHOLDS
        .iter()
        .find(|(upper, _)| total_months < *upper)
        .map(|(_, category)| *category)
        .unwrap_or(AgeCategory::Age15y)
}

pub fn age_category(birth: BirthDate, as_of: NaiveDate) -> Result<AgeCategory, ScheduleError> {
    exact_age(birth, as_of).map(|age| category_for_months(age.total_months()))
}

pub fn classify(birth: BirthDate, as_of: NaiveDate) -> Result<AgeProfile, ScheduleError> {
    let age = exact_age(birth, as_of)?;
    let total_months = age.total_months();
    let category = category_for_months(total_months);
    debug!(%as_of, total_months, category = category.key(), "classified child age");

    Ok(AgeProfile {
        category,
        years: age.years,
        months: age.months,
        days: age.days,
        total_months,
    })
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
