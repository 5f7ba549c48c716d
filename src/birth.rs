//! Birth date resolution.
//!
//! A birth date comes either from an explicit date of birth or from an age
//! in whole years counted back from today. Exactly one of the two must be
//! given.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::age::shift_years;
use crate::error::InvalidInputError;

/// Oldest accepted age, inclusive.
pub const MAX_AGE: i64 = 129;

/// Earliest accepted date of birth.
pub fn earliest_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// A validated birth date, never after the day it was resolved.
///
/// Explicit dates of birth must also be on or after 1900-01-01; the oldest
/// ages reach a few years further back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<BirthDate> for NaiveDate {
    fn from(birth: BirthDate) -> Self {
        birth.0
    }
}

/// Resolves a birth date from `dob` or `age`, relative to `today`.
///
/// With an age the birth date keeps today's month and day; if that day does
/// not exist in the target year (today is 29 Feb) it falls back to 28 Feb.
pub fn resolve(
    dob: Option<NaiveDate>,
    age: Option<i64>,
    today: NaiveDate,
) -> Result<BirthDate, InvalidInputError> {
    match (dob, age) {
        (Some(_), Some(_)) => Err(InvalidInputError::BothSupplied),
        (None, None) => Err(InvalidInputError::NeitherSupplied),
        (Some(dob), None) => from_dob(dob, today),
        (None, Some(age)) => from_age(age, today),
    }
}

/// [`resolve`] against the local calendar date.
pub fn resolve_today(
    dob: Option<NaiveDate>,
    age: Option<i64>,
) -> Result<BirthDate, InvalidInputError> {
    resolve(dob, age, Local::now().date_naive())
}

fn from_dob(dob: NaiveDate, today: NaiveDate) -> Result<BirthDate, InvalidInputError> {
    if dob > today {
        return Err(InvalidInputError::FutureDate { dob, today });
    }
    let earliest = earliest_birth_date();
    if dob < earliest {
        return Err(InvalidInputError::BeforeEarliest { dob, earliest });
    }
    Ok(BirthDate(dob))
}

fn from_age(age: i64, today: NaiveDate) -> Result<BirthDate, InvalidInputError> {
    if !(1..=MAX_AGE).contains(&age) {
        return Err(InvalidInputError::AgeOutOfRange { age });
    }
    // bounded by MAX_AGE above
    let years = -(age as i32);
    Ok(BirthDate(shift_years(today, years)))
}
