// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::acquisitive::AcquisitivePeriod;
use crate::dates::{business_days, calendar_days};
use crate::error::DomainError;
use crate::status::VacationStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Whether a vacation consumes the whole entitlement or a fraction of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VacationType {
    /// The whole entitlement in one block.
    #[serde(rename = "Total")]
    Full,
    /// One of up to three fractions of the entitlement.
    #[serde(rename = "Parcial")]
    Partial,
}

impl VacationType {
    /// Converts this vacation type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "Total",
            Self::Partial => "Parcial",
        }
    }
}

impl FromStr for VacationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Total" => Ok(Self::Full),
            "Parcial" => Ok(Self::Partial),
            _ => Err(DomainError::InvalidVacationType(s.to_string())),
        }
    }
}

impl std::fmt::Display for VacationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to take vacation, as submitted on behalf of an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationRequest {
    /// The employee taking the vacation.
    pub employee_id: i64,
    /// First day of vacation.
    pub start_date: Date,
    /// Last day of vacation (inclusive).
    pub end_date: Date,
    /// Full or partial.
    pub vacation_type: VacationType,
    /// Whether part of the entitlement is sold as abono pecuniário.
    pub is_abono_pecuniario: bool,
    /// Days sold. Only meaningful when `is_abono_pecuniario` is set.
    pub abono_days: Option<u16>,
}

impl VacationRequest {
    /// Creates a request without abono pecuniário.
    #[must_use]
    pub const fn new(
        employee_id: i64,
        start_date: Date,
        end_date: Date,
        vacation_type: VacationType,
    ) -> Self {
        Self {
            employee_id,
            start_date,
            end_date,
            vacation_type,
            is_abono_pecuniario: false,
            abono_days: None,
        }
    }

    /// Returns this request with `abono_days` sold as abono pecuniário.
    #[must_use]
    pub const fn with_abono(mut self, abono_days: Option<u16>) -> Self {
        self.is_abono_pecuniario = true;
        self.abono_days = abono_days;
        self
    }
}

/// A vacation record.
///
/// Dates and the derived day count are fixed at creation. Status only
/// changes through [`Vacation::approve`], [`Vacation::reject`] and
/// [`Vacation::cancel`], each of which returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vacation {
    vacation_id: Option<i64>,
    employee_id: i64,
    start_date: Date,
    end_date: Date,
    days: u16,
    vacation_type: VacationType,
    abono_days: Option<u16>,
    status: VacationStatus,
    requested_at: OffsetDateTime,
    approved_by: Option<String>,
    approved_at: Option<OffsetDateTime>,
    rejected_reason: Option<String>,
    acquisitive_period: AcquisitivePeriod,
}

impl Vacation {
    /// Creates a new pending vacation without a persisted id.
    ///
    /// `abono_days` is `Some` only when abono pecuniário was requested.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end_date` precedes `start_date`.
    pub fn new(
        employee_id: i64,
        start_date: Date,
        end_date: Date,
        vacation_type: VacationType,
        abono_days: Option<u16>,
        acquisitive_period: AcquisitivePeriod,
        requested_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let days: u16 = calendar_days(start_date, end_date)?;
        Ok(Self {
            vacation_id: None,
            employee_id,
            start_date,
            end_date,
            days,
            vacation_type,
            abono_days,
            status: VacationStatus::Pending,
            requested_at,
            approved_by: None,
            approved_at: None,
            rejected_reason: None,
            acquisitive_period,
        })
    }

    /// Rebuilds a vacation loaded from storage.
    ///
    /// The decision fields are restored with [`Vacation::with_decision`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end_date` precedes `start_date`.
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        vacation_id: i64,
        employee_id: i64,
        start_date: Date,
        end_date: Date,
        vacation_type: VacationType,
        abono_days: Option<u16>,
        status: VacationStatus,
        acquisitive_period: AcquisitivePeriod,
        requested_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let mut vacation: Self = Self::new(
            employee_id,
            start_date,
            end_date,
            vacation_type,
            abono_days,
            acquisitive_period,
            requested_at,
        )?;
        vacation.vacation_id = Some(vacation_id);
        vacation.status = status;
        Ok(vacation)
    }

    /// Returns this vacation with the recorded decision fields.
    #[must_use]
    pub fn with_decision(
        mut self,
        approved_by: Option<String>,
        approved_at: Option<OffsetDateTime>,
        rejected_reason: Option<String>,
    ) -> Self {
        self.approved_by = approved_by;
        self.approved_at = approved_at;
        self.rejected_reason = rejected_reason;
        self
    }

    /// Approves a pending vacation.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyProcessed` if the vacation is no longer pending.
    pub fn approve(&self, approved_by: &str, at: OffsetDateTime) -> Result<Self, DomainError> {
        self.status.validate_transition(VacationStatus::Approved)?;
        let mut approved: Self = self.clone();
        approved.status = VacationStatus::Approved;
        approved.approved_by = Some(approved_by.to_string());
        approved.approved_at = Some(at);
        Ok(approved)
    }

    /// Rejects a pending vacation.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyProcessed` if the vacation is no longer pending.
    pub fn reject(&self, rejected_by: &str, reason: Option<String>) -> Result<Self, DomainError> {
        self.status.validate_transition(VacationStatus::Rejected)?;
        let mut rejected: Self = self.clone();
        rejected.status = VacationStatus::Rejected;
        rejected.approved_by = Some(rejected_by.to_string());
        rejected.rejected_reason = reason;
        Ok(rejected)
    }

    /// Cancels a pending vacation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for an approved vacation and
    /// `AlreadyProcessed` for a rejected or cancelled one.
    pub fn cancel(&self) -> Result<Self, DomainError> {
        self.status.validate_transition(VacationStatus::Cancelled)?;
        let mut cancelled: Self = self.clone();
        cancelled.status = VacationStatus::Cancelled;
        Ok(cancelled)
    }

    /// Returns true if this vacation shares at least one day with `[start, end]`.
    #[must_use]
    pub fn overlaps(&self, start: Date, end: Date) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    #[must_use]
    pub const fn vacation_id(&self) -> Option<i64> {
        self.vacation_id
    }

    #[must_use]
    pub const fn employee_id(&self) -> i64 {
        self.employee_id
    }

    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    #[must_use]
    pub const fn end_date(&self) -> Date {
        self.end_date
    }

    /// Inclusive calendar-day count.
    #[must_use]
    pub const fn days(&self) -> u16 {
        self.days
    }

    /// Weekdays within the vacation.
    #[must_use]
    pub fn business_days(&self) -> u16 {
        business_days(self.start_date, self.end_date)
    }

    #[must_use]
    pub const fn vacation_type(&self) -> VacationType {
        self.vacation_type
    }

    #[must_use]
    pub const fn is_abono_pecuniario(&self) -> bool {
        self.abono_days.is_some()
    }

    #[must_use]
    pub const fn abono_days(&self) -> Option<u16> {
        self.abono_days
    }

    #[must_use]
    pub const fn status(&self) -> VacationStatus {
        self.status
    }

    #[must_use]
    pub const fn requested_at(&self) -> OffsetDateTime {
        self.requested_at
    }

    /// The manager who decided the request, if any.
    #[must_use]
    pub fn approved_by(&self) -> Option<&str> {
        self.approved_by.as_deref()
    }

    /// Set only when approved.
    #[must_use]
    pub const fn approved_at(&self) -> Option<OffsetDateTime> {
        self.approved_at
    }

    #[must_use]
    pub fn rejected_reason(&self) -> Option<&str> {
        self.rejected_reason.as_deref()
    }

    #[must_use]
    pub const fn acquisitive_period(&self) -> AcquisitivePeriod {
        self.acquisitive_period
    }
}

/// An employee and their vacation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Canonical internal identifier.
    /// `None` until the employee is persisted.
    pub employee_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub hire_date: Date,
    /// Unjustified absences in the current acquisitive period.
    pub unjustified_absences: u32,
    /// Start of the acquisitive period currently accruing.
    pub current_acquisitive_period_start: Date,
    /// End date of the most recently approved vacation.
    pub last_vacation_end_date: Option<Date>,
    /// Every vacation ever requested by this employee.
    pub vacations: Vec<Vacation>,
}

impl Employee {
    /// Creates a new `Employee` without a persisted `employee_id`.
    #[must_use]
    pub const fn new(
        name: String,
        email: String,
        position: String,
        department: String,
        hire_date: Date,
        unjustified_absences: u32,
        current_acquisitive_period_start: Date,
    ) -> Self {
        Self {
            employee_id: None,
            name,
            email,
            position,
            department,
            hire_date,
            unjustified_absences,
            current_acquisitive_period_start,
            last_vacation_end_date: None,
            vacations: Vec::new(),
        }
    }

    /// Returns this employee with a persisted identifier.
    #[must_use]
    pub const fn with_id(mut self, employee_id: i64) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    /// Vacations that still block their dates (pending or approved).
    pub fn active_vacations(&self) -> impl Iterator<Item = &Vacation> {
        self.vacations.iter().filter(|v| v.status().is_active())
    }

    /// Returns true if an approved vacation of at least `minimum_days` exists.
    #[must_use]
    pub fn has_approved_period_of(&self, minimum_days: u16) -> bool {
        self.vacations
            .iter()
            .any(|v| v.status() == VacationStatus::Approved && v.days() >= minimum_days)
    }
}
