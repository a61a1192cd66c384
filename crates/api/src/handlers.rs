// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each mutating handler loads what the command needs, runs the core
//! transition, and persists the result. The caller supplies the clock
//! and national holidays, and must serialize calls on one `Persistence`.

use std::collections::HashMap;

use ferias::{Command, TransitionContext, TransitionResult, apply};
use ferias_domain::{
    ABONO_DEADLINE_DAYS, AcquisitivePeriod, Employee, HolidayCalendar, NationalHolidays, Vacation,
    VacationRequest, VacationStatus, VacationType, count_expired_periods, entitled_days,
    max_abono_days, parse_date,
};
use ferias_persistence::{PersistTransitionResult, Persistence, VacationStats};
use time::format_description::well_known::Rfc3339;
use time::{Date, Duration, Month, OffsetDateTime, UtcOffset};
use tracing::info;

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    CalendarResponse, CreateEmployeeRequest, EmployeeResponse, EmployeeSummary,
    EntitlementSummary, SubmitVacationRequest, UpdateAbsencesRequest,
    UpdateVacationStatusRequest, VacationResponse, VacationStatsResponse,
};

/// Days ahead of today counted as "upcoming" on the dashboard.
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

// ============================================================================
// Conversions
// ============================================================================

fn parse_field_date(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|e| ApiError::InvalidInput {
        field: String::from(field),
        message: e.to_string(),
    })
}

/// Timestamps leave the service in UTC whatever offset `value` carries.
fn format_timestamp(value: OffsetDateTime) -> Result<String, ApiError> {
    value.to_offset(UtcOffset::UTC).format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn persisted_id(id: Option<i64>, what: &str) -> Result<i64, ApiError> {
    id.ok_or_else(|| ApiError::Internal {
        message: format!("Persistence did not return a {what} ID"),
    })
}

fn employee_summary(employee: &Employee) -> Option<EmployeeSummary> {
    employee.employee_id.map(|id| EmployeeSummary {
        id,
        name: employee.name.clone(),
        email: employee.email.clone(),
        position: employee.position.clone(),
        department: employee.department.clone(),
    })
}

fn vacation_response(
    vacation: &Vacation,
    employee: Option<EmployeeSummary>,
) -> Result<VacationResponse, ApiError> {
    let id: i64 = persisted_id(vacation.vacation_id(), "vacation")?;
    let period: AcquisitivePeriod = vacation.acquisitive_period();

    Ok(VacationResponse {
        id,
        employee_id: vacation.employee_id(),
        start_date: vacation.start_date().to_string(),
        end_date: vacation.end_date().to_string(),
        days: vacation.days(),
        business_days: vacation.business_days(),
        vacation_type: vacation.vacation_type().to_string(),
        is_abono_pecuniario: vacation.is_abono_pecuniario(),
        abono_days: vacation.abono_days(),
        status: vacation.status().to_string(),
        requested_at: format_timestamp(vacation.requested_at())?,
        approved_by: vacation.approved_by().map(String::from),
        approved_at: vacation.approved_at().map(format_timestamp).transpose()?,
        rejected_reason: vacation.rejected_reason().map(String::from),
        acquisitive_period_start: period.start.to_string(),
        acquisitive_period_end: period.end.to_string(),
        employee,
    })
}

/// Builds responses for vacations that may belong to different employees.
fn vacation_responses(
    persistence: &mut Persistence,
    vacations: &[Vacation],
) -> Result<Vec<VacationResponse>, ApiError> {
    let summaries: HashMap<i64, EmployeeSummary> = persistence
        .list_employees()
        .map_err(translate_persistence_error)?
        .iter()
        .filter_map(employee_summary)
        .map(|summary| (summary.id, summary))
        .collect();

    vacations
        .iter()
        .map(|vacation| {
            vacation_response(vacation, summaries.get(&vacation.employee_id()).cloned())
        })
        .collect()
}

fn employee_response(employee: &Employee, today: Date) -> Result<EmployeeResponse, ApiError> {
    let id: i64 = persisted_id(employee.employee_id, "employee")?;
    let entitled: u16 = entitled_days(employee.unjustified_absences);
    let period: AcquisitivePeriod =
        AcquisitivePeriod::starting_at(employee.current_acquisitive_period_start)
            .map_err(translate_domain_error)?;

    let entitlement: EntitlementSummary = EntitlementSummary {
        entitled_days: entitled,
        max_abono_days: max_abono_days(entitled),
        acquisitive_period_start: period.start.to_string(),
        acquisitive_period_end: period.end.to_string(),
        concessive_period_end: period
            .concessive_end()
            .map_err(translate_domain_error)?
            .to_string(),
        abono_deadline: period
            .abono_deadline(ABONO_DEADLINE_DAYS)
            .map_err(translate_domain_error)?
            .to_string(),
        expired_periods: count_expired_periods(employee.hire_date, &employee.vacations, today)
            .map_err(translate_domain_error)?,
    };

    Ok(EmployeeResponse {
        id,
        name: employee.name.clone(),
        email: employee.email.clone(),
        position: employee.position.clone(),
        department: employee.department.clone(),
        hire_date: employee.hire_date.to_string(),
        unjustified_absences: employee.unjustified_absences,
        current_acquisitive_period_start: employee.current_acquisitive_period_start.to_string(),
        last_vacation_end_date: employee.last_vacation_end_date.map(|d| d.to_string()),
        vacation_count: employee.vacations.len(),
        entitlement,
    })
}

fn load_employee(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<Option<Employee>, ApiError> {
    persistence
        .find_employee(employee_id)
        .map_err(translate_persistence_error)
}

fn require_employee(persistence: &mut Persistence, employee_id: i64) -> Result<Employee, ApiError> {
    load_employee(persistence, employee_id)?.ok_or_else(|| ApiError::ResourceNotFound {
        resource_type: String::from("Employee"),
        message: format!("Employee {employee_id} does not exist"),
    })
}

fn require_vacation(persistence: &mut Persistence, vacation_id: i64) -> Result<Vacation, ApiError> {
    persistence
        .get_vacation(vacation_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Vacation"),
            message: format!("Vacation {vacation_id} does not exist"),
        })
}

/// Applies `command` to the employee that owns `vacation_id` and persists it.
fn transition_vacation(
    persistence: &mut Persistence,
    vacation_id: i64,
    command: Command,
    now: OffsetDateTime,
) -> Result<(Vacation, Employee), ApiError> {
    let current: Vacation = require_vacation(persistence, vacation_id)?;
    let employee: Employee = require_employee(persistence, current.employee_id())?;

    // Decisions do not consult the holiday calendar
    let holidays: NationalHolidays = NationalHolidays::empty();
    let context = TransitionContext::new(now, &holidays);
    let result: TransitionResult =
        apply(Some(&employee), command, &context).map_err(translate_core_error)?;

    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    let updated: Vacation = require_vacation(persistence, vacation_id)?;
    Ok((updated, employee))
}

// ============================================================================
// Vacations
// ============================================================================

/// Submits a vacation request.
///
/// The request is validated against every eligibility rule before anything
/// is written. On success the vacation is stored as `Pendente`.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `holidays` - National holidays covering the requested dates
/// * `request` - The submission
/// * `now` - The current instant
///
/// # Errors
///
/// Returns an error if:
/// - A field is malformed or the end date precedes the start date
/// - The employee does not exist
/// - An eligibility rule rejects the request
/// - An overlapping vacation was stored concurrently
pub fn submit_vacation_request<H: HolidayCalendar>(
    persistence: &mut Persistence,
    holidays: &H,
    request: &SubmitVacationRequest,
    now: OffsetDateTime,
) -> Result<VacationResponse, ApiError> {
    let start_date: Date = parse_field_date("startDate", &request.start_date)?;
    let end_date: Date = parse_field_date("endDate", &request.end_date)?;
    if end_date < start_date {
        return Err(ApiError::InvalidInput {
            field: String::from("endDate"),
            message: format!("End date {end_date} precedes start date {start_date}"),
        });
    }
    let vacation_type: VacationType = request
        .vacation_type
        .parse()
        .map_err(translate_domain_error)?;

    let mut vacation_request: VacationRequest =
        VacationRequest::new(request.employee_id, start_date, end_date, vacation_type);
    if request.is_abono_pecuniario {
        vacation_request = vacation_request.with_abono(request.abono_days);
    }

    let employee: Option<Employee> = load_employee(persistence, request.employee_id)?;
    let context = TransitionContext::new(now, holidays);
    let result: TransitionResult = apply(
        employee.as_ref(),
        Command::SubmitVacation {
            request: vacation_request,
        },
        &context,
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;
    let vacation_id: i64 = persisted_id(persisted.vacation_id, "vacation")?;

    info!(
        vacation_id,
        employee_id = request.employee_id,
        %start_date,
        %end_date,
        "Vacation request submitted"
    );

    let vacation: Vacation = require_vacation(persistence, vacation_id)?;
    vacation_response(&vacation, employee.as_ref().and_then(employee_summary))
}

/// Approves or rejects a pending vacation.
///
/// # Errors
///
/// Returns an error if:
/// - The status is not `Aprovada` or `Rejeitada`, or the approver is blank
/// - The vacation or its employee does not exist
/// - The vacation is no longer pending
pub fn update_vacation_status(
    persistence: &mut Persistence,
    vacation_id: i64,
    request: UpdateVacationStatusRequest,
    now: OffsetDateTime,
) -> Result<VacationResponse, ApiError> {
    let status: VacationStatus = request.status.parse().map_err(translate_domain_error)?;

    let command: Command = match status {
        VacationStatus::Approved => Command::ApproveVacation {
            vacation_id,
            approved_by: request.approved_by,
        },
        VacationStatus::Rejected => Command::RejectVacation {
            vacation_id,
            approved_by: request.approved_by,
            reason: request.rejected_reason,
        },
        VacationStatus::Pending | VacationStatus::Cancelled => {
            return Err(ApiError::InvalidInput {
                field: String::from("status"),
                message: format!("Status must be 'Aprovada' or 'Rejeitada', got '{status}'"),
            });
        }
    };

    let (vacation, employee) = transition_vacation(persistence, vacation_id, command, now)?;
    info!(vacation_id, status = %vacation.status(), "Vacation decided");

    vacation_response(&vacation, employee_summary(&employee))
}

/// Cancels a pending vacation.
///
/// # Errors
///
/// Returns an error if the vacation does not exist or is no longer pending.
pub fn cancel_vacation(
    persistence: &mut Persistence,
    vacation_id: i64,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    transition_vacation(
        persistence,
        vacation_id,
        Command::CancelVacation { vacation_id },
        now,
    )?;
    info!(vacation_id, "Vacation cancelled");
    Ok(())
}

/// Retrieves a vacation by ID.
///
/// # Errors
///
/// Returns an error if the vacation does not exist.
pub fn get_vacation(
    persistence: &mut Persistence,
    vacation_id: i64,
) -> Result<VacationResponse, ApiError> {
    let vacation: Vacation = require_vacation(persistence, vacation_id)?;
    let employee: Option<Employee> = load_employee(persistence, vacation.employee_id())?;
    vacation_response(&vacation, employee.as_ref().and_then(employee_summary))
}

/// Lists every vacation, most recently requested first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_vacations(persistence: &mut Persistence) -> Result<Vec<VacationResponse>, ApiError> {
    let vacations: Vec<Vacation> = persistence
        .list_vacations()
        .map_err(translate_persistence_error)?;
    vacation_responses(persistence, &vacations)
}

/// Lists one employee's vacations, most recently requested first.
///
/// # Errors
///
/// Returns an error if the employee does not exist.
pub fn list_employee_vacations(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<Vec<VacationResponse>, ApiError> {
    let employee: Employee = require_employee(persistence, employee_id)?;
    let vacations: Vec<Vacation> = persistence
        .list_vacations_for_employee(employee_id)
        .map_err(translate_persistence_error)?;

    vacations
        .iter()
        .map(|vacation| vacation_response(vacation, employee_summary(&employee)))
        .collect()
}

/// Returns dashboard counts as of `today`.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn get_vacation_stats(
    persistence: &mut Persistence,
    today: Date,
) -> Result<VacationStatsResponse, ApiError> {
    let upcoming_until: Date =
        today
            .checked_add(Duration::days(UPCOMING_WINDOW_DAYS))
            .ok_or_else(|| ApiError::InvalidInput {
                field: String::from("date"),
                message: format!("Cannot look {UPCOMING_WINDOW_DAYS} days past {today}"),
            })?;

    let stats: VacationStats = persistence
        .vacation_stats(today, upcoming_until)
        .map_err(translate_persistence_error)?;

    Ok(VacationStatsResponse {
        total: stats.total,
        pending: stats.pending,
        approved: stats.approved,
        rejected: stats.rejected,
        upcoming: stats.upcoming,
    })
}

/// Lists approved vacations that start in, end in, or span a month.
///
/// # Errors
///
/// Returns an error if the month is not 1-12 or the year is out of range.
pub fn get_vacation_calendar(
    persistence: &mut Persistence,
    year: i32,
    month: u8,
) -> Result<CalendarResponse, ApiError> {
    let calendar_month: Month = Month::try_from(month).map_err(|_| ApiError::InvalidInput {
        field: String::from("month"),
        message: format!("Month must be between 1 and 12, got {month}"),
    })?;
    let out_of_range = |e: time::error::ComponentRange| ApiError::InvalidInput {
        field: String::from("year"),
        message: format!("Year {year} is out of range: {e}"),
    };

    let first_day: Date = Date::from_calendar_date(year, calendar_month, 1).map_err(out_of_range)?;
    let next_month_first_day: Date = if calendar_month == Month::December {
        Date::from_calendar_date(year + 1, Month::January, 1)
    } else {
        Date::from_calendar_date(year, calendar_month.next(), 1)
    }
    .map_err(out_of_range)?;
    let last_day: Date = next_month_first_day
        .previous_day()
        .ok_or_else(|| ApiError::Internal {
            message: format!("No day precedes {next_month_first_day}"),
        })?;

    let vacations: Vec<Vacation> = persistence
        .list_approved_vacations_in_range(first_day, last_day)
        .map_err(translate_persistence_error)?;

    Ok(CalendarResponse {
        year,
        month,
        vacations: vacation_responses(persistence, &vacations)?,
    })
}

// ============================================================================
// Employees
// ============================================================================

/// Registers an employee.
///
/// When `currentAcquisitivePeriodStart` is omitted it is derived from the
/// hire date as the acquisitive period containing today.
///
/// # Errors
///
/// Returns an error if a field is malformed, the email is taken, or the
/// acquisitive period start precedes the hire date.
pub fn create_employee(
    persistence: &mut Persistence,
    request: CreateEmployeeRequest,
    now: OffsetDateTime,
) -> Result<EmployeeResponse, ApiError> {
    let hire_date: Date = parse_field_date("hireDate", &request.hire_date)?;
    let current_acquisitive_period_start: Option<Date> = request
        .current_acquisitive_period_start
        .as_deref()
        .map(|value| parse_field_date("currentAcquisitivePeriodStart", value))
        .transpose()?;

    let holidays: NationalHolidays = NationalHolidays::empty();
    let context = TransitionContext::new(now, &holidays);
    let result: TransitionResult = apply(
        None,
        Command::RegisterEmployee {
            name: request.name,
            email: request.email,
            position: request.position,
            department: request.department,
            hire_date,
            unjustified_absences: request.unjustified_absences,
            current_acquisitive_period_start,
        },
        &context,
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;
    let employee_id: i64 = persisted_id(persisted.employee_id, "employee")?;

    let employee: Employee = require_employee(persistence, employee_id)?;
    employee_response(&employee, now.date())
}

/// Lists all employees ordered by name.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_employees(
    persistence: &mut Persistence,
    today: Date,
) -> Result<Vec<EmployeeResponse>, ApiError> {
    persistence
        .list_employees()
        .map_err(translate_persistence_error)?
        .iter()
        .map(|employee| employee_response(employee, today))
        .collect()
}

/// Retrieves an employee with their entitlement summary.
///
/// # Errors
///
/// Returns an error if the employee does not exist.
pub fn get_employee(
    persistence: &mut Persistence,
    employee_id: i64,
    today: Date,
) -> Result<EmployeeResponse, ApiError> {
    let employee: Employee = require_employee(persistence, employee_id)?;
    employee_response(&employee, today)
}

/// Replaces an employee's unjustified-absence count.
///
/// # Errors
///
/// Returns an error if the employee does not exist.
pub fn update_unjustified_absences(
    persistence: &mut Persistence,
    employee_id: i64,
    request: UpdateAbsencesRequest,
    now: OffsetDateTime,
) -> Result<EmployeeResponse, ApiError> {
    let employee: Option<Employee> = load_employee(persistence, employee_id)?;

    let holidays: NationalHolidays = NationalHolidays::empty();
    let context = TransitionContext::new(now, &holidays);
    let result: TransitionResult = apply(
        employee.as_ref(),
        Command::RecordAbsences {
            employee_id,
            unjustified_absences: request.unjustified_absences,
        },
        &context,
    )
    .map_err(translate_core_error)?;

    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    let updated: Employee = require_employee(persistence, employee_id)?;
    employee_response(&updated, now.date())
}
