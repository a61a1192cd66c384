// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Acquisitive and concessive period resolution.
//!
//! Every twelve months of service (the acquisitive period) earn one
//! vacation, which must be granted within the following twelve months
//! (the concessive period). Periods are anchored to the hire date: the
//! k-th period starts on the k-th hire anniversary and ends the day
//! before the next one.

use crate::dates::add_years;
use crate::error::DomainError;
use crate::status::VacationStatus;
use crate::types::Vacation;
use time::{Date, Duration};

/// A twelve-month acquisitive period, inclusive of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AcquisitivePeriod {
    /// First day of the period.
    pub start: Date,
    /// Last day of the period.
    pub end: Date,
}

impl AcquisitivePeriod {
    /// Builds the twelve-month period beginning on `start`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the end cannot be represented.
    pub fn starting_at(start: Date) -> Result<Self, DomainError> {
        let next_start: Date = add_years(start, 1)?;
        let end: Date = next_start
            .previous_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("computing the day before {next_start}"),
            })?;
        Ok(Self { start, end })
    }

    /// Last day on which the vacation earned by this period may be granted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the date cannot be represented.
    pub fn concessive_end(&self) -> Result<Date, DomainError> {
        add_years(self.end, 1)
    }

    /// Last day on which abono pecuniário may be requested for this period.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the date cannot be represented.
    pub fn abono_deadline(&self, days_before_end: i64) -> Result<Date, DomainError> {
        self.end
            .checked_sub(Duration::days(days_before_end))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("subtracting {days_before_end} days from {}", self.end),
            })
    }

    /// Returns true if `date` falls within the period.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// An acquisitive period together with its concessive deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitiveBlock {
    /// The acquisitive period.
    pub period: AcquisitivePeriod,
    /// Last day on which the earned vacation may start.
    pub concessive_end: Date,
}

impl AcquisitiveBlock {
    /// Returns true if an approved vacation starts within
    /// `[period.start, concessive_end]`.
    #[must_use]
    pub fn is_used_by(&self, vacations: &[Vacation]) -> bool {
        vacations.iter().any(|vacation| {
            vacation.status() == VacationStatus::Approved
                && vacation.start_date() >= self.period.start
                && vacation.start_date() <= self.concessive_end
        })
    }

    /// Returns true if the concessive deadline passed without the block being used.
    #[must_use]
    pub fn is_expired(&self, vacations: &[Vacation], today: Date) -> bool {
        self.concessive_end < today && !self.is_used_by(vacations)
    }
}

/// Resolves the acquisitive period that contains `target`.
///
/// The result is the hire-anchored period whose start is the latest
/// anniversary not after `target`. When `target` precedes the hire date
/// the first period is returned. Resolving again from the returned start
/// yields the same period.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if an anniversary cannot be represented.
pub fn resolve_acquisitive_period(
    hire_date: Date,
    target: Date,
) -> Result<AcquisitivePeriod, DomainError> {
    if target <= hire_date {
        return AcquisitivePeriod::starting_at(hire_date);
    }

    let mut years: i32 = target.year() - hire_date.year();
    let mut start: Date = add_years(hire_date, years)?;
    if start > target {
        years -= 1;
        start = add_years(hire_date, years)?;
    }

    let next_start: Date = add_years(hire_date, years + 1)?;
    let end: Date = next_start
        .previous_day()
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing the day before {next_start}"),
        })?;

    Ok(AcquisitivePeriod { start, end })
}

/// Enumerates the acquisitive blocks that began before `today`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if an anniversary cannot be represented.
pub fn acquisitive_blocks(
    hire_date: Date,
    today: Date,
) -> Result<Vec<AcquisitiveBlock>, DomainError> {
    let mut blocks: Vec<AcquisitiveBlock> = Vec::new();
    let mut years: i32 = 0;

    loop {
        let start: Date = add_years(hire_date, years)?;
        if start >= today {
            break;
        }

        let next_start: Date = add_years(hire_date, years + 1)?;
        let end: Date = next_start
            .previous_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("computing the day before {next_start}"),
            })?;
        let period: AcquisitivePeriod = AcquisitivePeriod { start, end };

        blocks.push(AcquisitiveBlock {
            period,
            concessive_end: period.concessive_end()?,
        });
        years += 1;
    }

    Ok(blocks)
}

/// Counts the blocks whose concessive deadline has passed unused.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if an anniversary cannot be represented.
pub fn count_expired_periods(
    hire_date: Date,
    vacations: &[Vacation],
    today: Date,
) -> Result<usize, DomainError> {
    Ok(acquisitive_blocks(hire_date, today)?
        .iter()
        .filter(|block| block.is_expired(vacations, today))
        .count())
}
