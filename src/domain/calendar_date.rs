use crate::error::CalendarError;
use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sunday-first column headers for the month grid.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Date-only value compared field by field. Ordering is chronological
/// because the fields are declared from most to least significant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        let date = Self { year, month, day };
        date.validate()?;
        Ok(date)
    }

    /// Parses the `YYYY-MM-DD` form used by event sources.
    pub fn parse(value: &str) -> Result<Self, CalendarError> {
        let parsed = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_| CalendarError::InvalidDate(format!("'{value}' must be YYYY-MM-DD")))?;
        Ok(Self::from(parsed))
    }

    pub fn validate(&self) -> Result<(), CalendarError> {
        let days = days_in_month(self.year, self.month)?;
        if self.day == 0 || self.day > days {
            return Err(CalendarError::InvalidDate(format!(
                "day {} is outside 1..={days} for {:04}-{:02}",
                self.day, self.year, self.month
            )));
        }
        Ok(())
    }

    pub fn year_month(&self) -> Result<YearMonth, CalendarError> {
        YearMonth::new(self.year, self.month)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A displayed month. The month is always within 1..=12.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        validate_month(month)?;
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        month_length(self.year, self.month)
    }

    pub fn first_weekday(&self) -> u32 {
        weekday_from_sunday(self.year, self.month, 1)
    }

    pub fn shift(&self, delta: i32) -> Result<Self, CalendarError> {
        shift_month(self.year, self.month, delta)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.year == self.year && date.month == self.month
    }

    /// Header text such as "March 2024".
    pub fn title(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map_or("", |month| month.name());
        format!("{name} {}", self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    validate_month(month)?;
    Ok(month_length(year, month))
}

/// Weekday of the 1st of the month, 0 = Sunday.
pub fn first_weekday_of_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    validate_month(month)?;
    Ok(weekday_from_sunday(year, month, 1))
}

pub fn is_same_calendar_day(a: &CalendarDate, b: &CalendarDate) -> bool {
    a.year == b.year && a.month == b.month && a.day == b.day
}

/// Moves a (year, month) pair by `delta` months, carrying into the year.
/// No day component is involved, so there is no end-of-month clamping.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Result<YearMonth, CalendarError> {
    validate_month(month)?;
    let total = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let shifted_year = i32::try_from(total.div_euclid(12)).map_err(|_| {
        CalendarError::InvalidDate(format!(
            "shifting {year:04}-{month:02} by {delta} months leaves the supported year range"
        ))
    })?;
    let shifted_month = total.rem_euclid(12) as u32 + 1;
    Ok(YearMonth {
        year: shifted_year,
        month: shifted_month,
    })
}

fn validate_month(month: u32) -> Result<(), CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidDate(format!(
            "month {month} is outside 1..=12"
        )));
    }
    Ok(())
}

fn month_length(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// Proleptic Gregorian day count relative to 1970-01-01, valid for every i32 year.
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    let year = i64::from(year) - i64::from(month <= 2);
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

fn weekday_from_sunday(year: i32, month: u32, day: u32) -> u32 {
    // 1970-01-01 was a Thursday.
    (days_from_civil(year, month, day) + 4).rem_euclid(7) as u32
}
