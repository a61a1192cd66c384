// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::eligibility::StartDateRestriction;
use crate::status::VacationStatus;
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Employee does not exist.
    EmployeeNotFound {
        /// The requested employee identifier.
        employee_id: i64,
    },
    /// Vacation does not exist.
    VacationNotFound {
        /// The requested vacation identifier.
        vacation_id: i64,
    },
    /// The employee forfeited the annual vacation because of unjustified absences.
    EntitlementExhausted {
        /// The employee's unjustified absence count.
        unjustified_absences: u32,
    },
    /// More calendar days were requested than the employee is entitled to.
    ExceedsEntitlement {
        /// Calendar days requested.
        requested_days: u16,
        /// Calendar days allowed by the entitlement band.
        allowed_days: u16,
    },
    /// Vacation cannot start on a weekend or national holiday.
    InvalidStartDate {
        /// The rejected start date.
        start_date: Date,
        /// Why the start date is not allowed.
        restriction: StartDateRestriction,
    },
    /// Abono pecuniário was requested without a positive number of days.
    AbonoDaysMissing,
    /// Abono pecuniário exceeds one third of the entitlement.
    AbonoExceedsOneThird {
        /// Abono days requested.
        abono_days: u16,
        /// Maximum abono days allowed.
        max_abono_days: u16,
    },
    /// Vacation days plus abono days do not consume the entitlement exactly.
    AbonoSumMismatch {
        /// Calendar days requested as vacation.
        requested_days: u16,
        /// Abono days requested.
        abono_days: u16,
        /// Calendar days allowed by the entitlement band.
        allowed_days: u16,
    },
    /// Abono pecuniário must be requested up to 15 days before the acquisitive period ends.
    AbonoDeadlinePassed {
        /// The last day on which abono could be requested.
        deadline: Date,
    },
    /// A partial vacation period is shorter than the minimum.
    PeriodTooShort {
        /// Calendar days requested.
        requested_days: u16,
        /// Minimum calendar days for any partial period.
        minimum_days: u16,
    },
    /// The first partial period must be the long block.
    FirstPeriodTooShort {
        /// Calendar days requested.
        requested_days: u16,
        /// Minimum calendar days for the first partial period.
        minimum_days: u16,
    },
    /// The requested range overlaps an active vacation of the same employee.
    OverlappingPeriod {
        /// Requested start date.
        start_date: Date,
        /// Requested end date.
        end_date: Date,
        /// The conflicting vacation, when known.
        conflicting_vacation_id: Option<i64>,
    },
    /// The employee has not completed twelve months of service.
    AcquisitivePeriodNotMet {
        /// Whole months between hire date and today.
        months_worked: i32,
    },
    /// The employee has two or more expired acquisitive periods.
    TooManyExpiredPeriods {
        /// Number of expired periods found.
        expired_periods: usize,
    },
    /// The vacation was already decided or cancelled.
    AlreadyProcessed {
        /// The vacation's current status.
        status: VacationStatus,
    },
    /// The status transition is not permitted.
    InvalidTransition {
        /// The vacation's current status.
        from: VacationStatus,
        /// The requested status.
        to: VacationStatus,
    },
    /// End date precedes start date.
    InvalidDateRange {
        /// The start date.
        start_date: Date,
        /// The end date.
        end_date: Date,
    },
    /// Vacation type string is not recognised.
    InvalidVacationType(String),
    /// Vacation status string is not recognised.
    InvalidVacationStatus(String),
    /// Employee fields are empty or inconsistent.
    InvalidEmployee(String),
    /// Approver identity is empty.
    InvalidApprover,
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmployeeNotFound { employee_id } => {
                write!(f, "Employee {employee_id} not found")
            }
            Self::VacationNotFound { vacation_id } => {
                write!(f, "Vacation request {vacation_id} not found")
            }
            Self::EntitlementExhausted {
                unjustified_absences,
            } => write!(
                f,
                "Employee forfeited vacation rights after {unjustified_absences} unjustified absences"
            ),
            Self::ExceedsEntitlement {
                requested_days,
                allowed_days,
            } => write!(
                f,
                "Requested {requested_days} vacation days exceeds the {allowed_days} days allowed"
            ),
            Self::InvalidStartDate {
                start_date,
                restriction,
            } => write!(
                f,
                "Vacation cannot start on {start_date}: it falls on a {restriction}"
            ),
            Self::AbonoDaysMissing => write!(
                f,
                "Abono pecuniário requires a number of sold days greater than zero"
            ),
            Self::AbonoExceedsOneThird {
                abono_days,
                max_abono_days,
            } => write!(
                f,
                "Cannot sell {abono_days} days: at most one third of the vacation ({max_abono_days} days) may be sold"
            ),
            Self::AbonoSumMismatch {
                requested_days,
                abono_days,
                allowed_days,
            } => write!(
                f,
                "Vacation days ({requested_days}) plus abono days ({abono_days}) must equal the {allowed_days} days allowed"
            ),
            Self::AbonoDeadlinePassed { deadline } => write!(
                f,
                "Abono pecuniário had to be requested by {deadline}, 15 days before the acquisitive period ends"
            ),
            Self::PeriodTooShort {
                requested_days,
                minimum_days,
            } => write!(
                f,
                "Partial vacation period of {requested_days} days is shorter than the {minimum_days}-day minimum"
            ),
            Self::FirstPeriodTooShort {
                requested_days,
                minimum_days,
            } => write!(
                f,
                "First vacation period of {requested_days} days must have at least {minimum_days} days"
            ),
            Self::OverlappingPeriod {
                start_date,
                end_date,
                conflicting_vacation_id,
            } => match conflicting_vacation_id {
                Some(id) => write!(
                    f,
                    "Period {start_date} to {end_date} overlaps vacation request {id}"
                ),
                None => write!(
                    f,
                    "Period {start_date} to {end_date} overlaps an existing vacation request"
                ),
            },
            Self::AcquisitivePeriodNotMet { months_worked } => write!(
                f,
                "Employee has worked {months_worked} months and has not completed the 12-month acquisitive period"
            ),
            Self::TooManyExpiredPeriods { expired_periods } => write!(
                f,
                "Employee has {expired_periods} expired vacation periods; new requests are blocked"
            ),
            Self::AlreadyProcessed { status } => {
                write!(f, "Vacation request was already processed (status {status})")
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot change vacation status from {from} to {to}")
            }
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => write!(
                f,
                "End date {end_date} must not precede start date {start_date}"
            ),
            Self::InvalidVacationType(value) => write!(
                f,
                "Invalid vacation type '{value}'. Must be 'Total' or 'Parcial'"
            ),
            Self::InvalidVacationStatus(value) => write!(f, "Invalid vacation status '{value}'"),
            Self::InvalidEmployee(msg) => write!(f, "Invalid employee: {msg}"),
            Self::InvalidApprover => write!(f, "Approver must not be empty"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
