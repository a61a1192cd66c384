// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar arithmetic used by the vacation rules.
//!
//! All functions are pure. Ranges are inclusive of both ends, so a
//! same-day range counts as one day.

use crate::error::DomainError;
use time::{Date, Month, Weekday};

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, &time::format_description::well_known::Iso8601::DEFAULT).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Counts the calendar days in `[start, end]`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `end` precedes `start`, or
/// `DateArithmeticOverflow` if the span does not fit in a `u16`.
pub fn calendar_days(start: Date, end: Date) -> Result<u16, DomainError> {
    if end < start {
        return Err(DomainError::InvalidDateRange {
            start_date: start,
            end_date: end,
        });
    }

    let span: i64 = (end - start).whole_days() + 1;
    u16::try_from(span).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("counting days from {start} to {end}"),
    })
}

/// Counts the days in `[start, end]` that are neither Saturday nor Sunday.
///
/// Holidays are not excluded. Returns 0 when `end` precedes `start`.
#[must_use]
pub fn business_days(start: Date, end: Date) -> u16 {
    let mut count: u16 = 0;
    let mut current: Date = start;

    while current <= end {
        if !matches!(current.weekday(), Weekday::Saturday | Weekday::Sunday) {
            count = count.saturating_add(1);
        }
        match current.next_day() {
            Some(next) => current = next,
            None => break,
        }
    }

    count
}

/// Shifts a date by whole calendar years.
///
/// February 29 shifted onto a non-leap year becomes March 1.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the resulting year is
/// outside the supported range.
pub fn add_years(date: Date, years: i32) -> Result<Date, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("adding {years} years to {date}"),
    };

    let target_year: i32 = date.year().checked_add(years).ok_or_else(overflow)?;

    match date.replace_year(target_year) {
        Ok(shifted) => Ok(shifted),
        Err(_) if date.month() == Month::February && date.day() == 29 => {
            Date::from_calendar_date(target_year, Month::March, 1).map_err(|_| overflow())
        }
        Err(_) => Err(overflow()),
    }
}

/// Whole months between two dates, ignoring the day of month.
///
/// Negative when `to` precedes `from`.
#[must_use]
pub fn months_between(from: Date, to: Date) -> i32 {
    let years: i32 = to.year() - from.year();
    let months: i32 = i32::from(u8::from(to.month())) - i32::from(u8::from(from.month()));
    years * 12 + months
}
