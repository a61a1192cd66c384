// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vacation request eligibility.
//!
//! A request is checked against the CLT vacation rules in a fixed order and
//! the first failing rule is reported. Each rule is a separate function so
//! it can be exercised on its own; [`validate_vacation_request`] composes
//! them. Nothing here performs I/O: the employee, the holiday calendar and
//! the current date are all supplied by the caller.

use crate::acquisitive::{AcquisitivePeriod, count_expired_periods, resolve_acquisitive_period};
use crate::dates::{calendar_days, months_between};
use crate::entitlement::{entitled_days, max_abono_days};
use crate::error::DomainError;
use crate::holidays::HolidayCalendar;
use crate::types::{Employee, VacationRequest, VacationType};
use time::{Date, Weekday};

/// Abono pecuniário must be requested at least this many days before the
/// acquisitive period ends.
pub const ABONO_DEADLINE_DAYS: i64 = 15;

/// Minimum length of any partial vacation period.
pub const PARTIAL_MINIMUM_DAYS: u16 = 5;

/// Minimum length of the first partial period, until one such period is approved.
pub const FIRST_PARTIAL_MINIMUM_DAYS: u16 = 14;

/// Months of service before the first vacation may be requested.
pub const REQUIRED_SERVICE_MONTHS: i32 = 12;

/// Requests are blocked once this many acquisitive periods expired unused.
pub const MAX_EXPIRED_PERIODS: usize = 2;

/// Why a start date is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartDateRestriction {
    Saturday,
    Sunday,
    NationalHoliday,
}

impl StartDateRestriction {
    /// Returns the string representation of the restriction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
            Self::NationalHoliday => "national_holiday",
        }
    }
}

impl std::fmt::Display for StartDateRestriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saturday => write!(f, "Saturday"),
            Self::Sunday => write!(f, "Sunday"),
            Self::NationalHoliday => write!(f, "national holiday"),
        }
    }
}

/// Outcome of a successful eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibleVacation {
    /// Days the employee is entitled to.
    pub allowed_days: u16,
    /// Inclusive calendar days requested.
    pub requested_days: u16,
    /// Days sold as abono pecuniário, when requested.
    pub abono_days: Option<u16>,
    /// The acquisitive period the vacation is charged to.
    pub acquisitive_period: AcquisitivePeriod,
}

/// Validates a vacation request against every eligibility rule.
///
/// Rules are applied in this order and the first failure is returned:
///
/// 1. The employee exists.
/// 2. The entitlement is not forfeited by absences.
/// 3. The requested days do not exceed the entitlement.
/// 4. The vacation does not start on a weekend or national holiday.
/// 5. Abono pecuniário limits, when requested.
/// 6. Fractionation minimums, for partial vacations.
/// 7. No overlap with pending or approved vacations.
/// 8. Twelve months of service completed.
/// 9. Fewer than two expired acquisitive periods.
///
/// # Arguments
///
/// * `employee` - The employee as loaded from the record store, if found
/// * `request` - The submitted request
/// * `holidays` - National holidays for the start date's year
/// * `today` - The current date
///
/// # Errors
///
/// Returns the `DomainError` of the first rule that fails.
pub fn validate_vacation_request(
    employee: Option<&Employee>,
    request: &VacationRequest,
    holidays: &impl HolidayCalendar,
    today: Date,
) -> Result<EligibleVacation, DomainError> {
    let employee: &Employee = employee.ok_or(DomainError::EmployeeNotFound {
        employee_id: request.employee_id,
    })?;

    // Forfeiture is decided by absences alone, before the range is measured
    if entitled_days(employee.unjustified_absences) == 0 {
        return Err(DomainError::EntitlementExhausted {
            unjustified_absences: employee.unjustified_absences,
        });
    }

    let requested_days: u16 = calendar_days(request.start_date, request.end_date)?;
    let allowed_days: u16 = check_entitlement(employee.unjustified_absences, requested_days)?;

    check_start_date(request.start_date, holidays)?;

    let abono_days: Option<u16> = if request.is_abono_pecuniario {
        Some(check_abono(
            request.abono_days,
            requested_days,
            allowed_days,
            employee.current_acquisitive_period_start,
            today,
        )?)
    } else {
        None
    };

    check_fractionation(request.vacation_type, requested_days, employee)?;
    check_no_overlap(employee, request.start_date, request.end_date)?;
    check_acquisitive_period_met(employee.hire_date, today)?;
    check_expired_periods(employee, today)?;

    let acquisitive_period: AcquisitivePeriod =
        resolve_acquisitive_period(employee.hire_date, request.start_date)?;

    Ok(EligibleVacation {
        allowed_days,
        requested_days,
        abono_days,
        acquisitive_period,
    })
}

/// Checks the requested days against the absence-based entitlement.
///
/// Returns the allowed days on success.
///
/// # Errors
///
/// - `EntitlementExhausted` when the absences forfeit the vacation.
/// - `ExceedsEntitlement` when more days are requested than allowed.
pub const fn check_entitlement(
    unjustified_absences: u32,
    requested_days: u16,
) -> Result<u16, DomainError> {
    let allowed_days: u16 = entitled_days(unjustified_absences);

    if allowed_days == 0 {
        return Err(DomainError::EntitlementExhausted {
            unjustified_absences,
        });
    }

    if requested_days > allowed_days {
        return Err(DomainError::ExceedsEntitlement {
            requested_days,
            allowed_days,
        });
    }

    Ok(allowed_days)
}

/// Checks that a vacation does not start on a weekend or national holiday.
///
/// # Errors
///
/// Returns `InvalidStartDate` with the applicable restriction.
pub fn check_start_date(
    start_date: Date,
    holidays: &impl HolidayCalendar,
) -> Result<(), DomainError> {
    let restriction: Option<StartDateRestriction> = match start_date.weekday() {
        Weekday::Saturday => Some(StartDateRestriction::Saturday),
        Weekday::Sunday => Some(StartDateRestriction::Sunday),
        _ if holidays.is_national_holiday(start_date) => {
            Some(StartDateRestriction::NationalHoliday)
        }
        _ => None,
    };

    match restriction {
        Some(restriction) => Err(DomainError::InvalidStartDate {
            start_date,
            restriction,
        }),
        None => Ok(()),
    }
}

/// Checks the abono pecuniário limits.
///
/// Returns the validated abono days.
///
/// # Errors
///
/// - `AbonoDaysMissing` when no positive day count was given.
/// - `AbonoExceedsOneThird` when more than a third of the entitlement is sold.
/// - `AbonoSumMismatch` when vacation plus abono days differ from the entitlement.
/// - `AbonoDeadlinePassed` when requested later than 15 days before the
///   current acquisitive period ends.
pub fn check_abono(
    abono_days: Option<u16>,
    requested_days: u16,
    allowed_days: u16,
    current_acquisitive_period_start: Date,
    today: Date,
) -> Result<u16, DomainError> {
    let abono_days: u16 = match abono_days {
        Some(days) if days > 0 => days,
        _ => return Err(DomainError::AbonoDaysMissing),
    };

    let max_abono: u16 = max_abono_days(allowed_days);
    if abono_days > max_abono {
        return Err(DomainError::AbonoExceedsOneThird {
            abono_days,
            max_abono_days: max_abono,
        });
    }

    if u32::from(requested_days) + u32::from(abono_days) != u32::from(allowed_days) {
        return Err(DomainError::AbonoSumMismatch {
            requested_days,
            abono_days,
            allowed_days,
        });
    }

    let deadline: Date = AcquisitivePeriod::starting_at(current_acquisitive_period_start)?
        .abono_deadline(ABONO_DEADLINE_DAYS)?;
    if today > deadline {
        return Err(DomainError::AbonoDeadlinePassed { deadline });
    }

    Ok(abono_days)
}

/// Checks the fractionation minimums for partial vacations.
///
/// Every partial period needs at least 5 days. Until the employee has an
/// approved period of 14 days or more, the period must itself reach 14 days.
///
/// # Errors
///
/// - `PeriodTooShort` below the 5-day minimum.
/// - `FirstPeriodTooShort` below 14 days with no long period approved yet.
pub fn check_fractionation(
    vacation_type: VacationType,
    requested_days: u16,
    employee: &Employee,
) -> Result<(), DomainError> {
    if vacation_type != VacationType::Partial {
        return Ok(());
    }

    if requested_days < PARTIAL_MINIMUM_DAYS {
        return Err(DomainError::PeriodTooShort {
            requested_days,
            minimum_days: PARTIAL_MINIMUM_DAYS,
        });
    }

    if requested_days < FIRST_PARTIAL_MINIMUM_DAYS
        && !employee.has_approved_period_of(FIRST_PARTIAL_MINIMUM_DAYS)
    {
        return Err(DomainError::FirstPeriodTooShort {
            requested_days,
            minimum_days: FIRST_PARTIAL_MINIMUM_DAYS,
        });
    }

    Ok(())
}

/// Checks that `[start_date, end_date]` does not overlap a pending or approved vacation.
///
/// # Errors
///
/// Returns `OverlappingPeriod` naming the first conflicting vacation.
pub fn check_no_overlap(
    employee: &Employee,
    start_date: Date,
    end_date: Date,
) -> Result<(), DomainError> {
    match employee
        .active_vacations()
        .find(|vacation| vacation.overlaps(start_date, end_date))
    {
        Some(conflict) => Err(DomainError::OverlappingPeriod {
            start_date,
            end_date,
            conflicting_vacation_id: conflict.vacation_id(),
        }),
        None => Ok(()),
    }
}

/// Checks that the employee completed twelve months of service.
///
/// Months are counted by calendar month, ignoring the day of month.
///
/// # Errors
///
/// Returns `AcquisitivePeriodNotMet` with the months worked so far.
pub fn check_acquisitive_period_met(hire_date: Date, today: Date) -> Result<(), DomainError> {
    let months_worked: i32 = months_between(hire_date, today);
    if months_worked < REQUIRED_SERVICE_MONTHS {
        return Err(DomainError::AcquisitivePeriodNotMet { months_worked });
    }
    Ok(())
}

/// Checks that fewer than two acquisitive periods expired unused.
///
/// # Errors
///
/// Returns `TooManyExpiredPeriods` with the number of expired periods.
pub fn check_expired_periods(employee: &Employee, today: Date) -> Result<(), DomainError> {
    let expired_periods: usize = count_expired_periods(employee.hire_date, &employee.vacations, today)?;
    if expired_periods >= MAX_EXPIRED_PERIODS {
        return Err(DomainError::TooManyExpiredPeriods { expired_periods });
    }
    Ok(())
}
