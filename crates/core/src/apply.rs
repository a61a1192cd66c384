// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{TransitionContext, TransitionResult};
use ferias_domain::{
    DomainError, EligibleVacation, Employee, HolidayCalendar, Vacation, resolve_acquisitive_period,
    validate_approver, validate_employee_fields, validate_vacation_request,
};
use time::Date;

/// Applies a command to an employee record, producing the change to persist.
///
/// This function is pure: it reads the employee as loaded by the caller and
/// the clock and holidays from `context`, and returns the change without
/// writing anything.
///
/// # Arguments
///
/// * `employee` - The employee the command targets, with their vacation
///   history, or `None` if no such employee exists (always `None` for
///   `RegisterEmployee`)
/// * `command` - The command to apply
/// * `context` - The current instant and national holidays
///
/// # Returns
///
/// * `Ok(TransitionResult)` describing the change
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The employee or vacation does not exist
/// - The request fails an eligibility rule
/// - The status transition is not permitted
/// - The employee fields are invalid
pub fn apply<H: HolidayCalendar>(
    employee: Option<&Employee>,
    command: Command,
    context: &TransitionContext<'_, H>,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::RegisterEmployee {
            name,
            email,
            position,
            department,
            hire_date,
            unjustified_absences,
            current_acquisitive_period_start,
        } => {
            let current_start: Date = match current_acquisitive_period_start {
                Some(start) => start,
                None => resolve_acquisitive_period(hire_date, context.today())?.start,
            };

            let new_employee: Employee = Employee::new(
                name,
                email,
                position,
                department,
                hire_date,
                unjustified_absences,
                current_start,
            );
            validate_employee_fields(&new_employee)?;

            Ok(TransitionResult::EmployeeRegistered {
                employee: new_employee,
            })
        }
        Command::RecordAbsences {
            employee_id,
            unjustified_absences,
        } => {
            if employee.is_none() {
                return Err(CoreError::DomainViolation(DomainError::EmployeeNotFound {
                    employee_id,
                }));
            }

            Ok(TransitionResult::AbsencesRecorded {
                employee_id,
                unjustified_absences,
            })
        }
        Command::SubmitVacation { request } => {
            let eligibility: EligibleVacation =
                validate_vacation_request(employee, &request, context.holidays, context.today())?;

            let vacation: Vacation = Vacation::new(
                request.employee_id,
                request.start_date,
                request.end_date,
                request.vacation_type,
                eligibility.abono_days,
                eligibility.acquisitive_period,
                context.now,
            )?;

            Ok(TransitionResult::VacationCreated {
                vacation,
                eligibility,
            })
        }
        Command::ApproveVacation {
            vacation_id,
            approved_by,
        } => {
            validate_approver(&approved_by)?;
            let current: &Vacation = find_vacation(employee, vacation_id)?;
            let approved: Vacation = current.approve(&approved_by, context.now)?;
            let end_date: Date = approved.end_date();

            Ok(TransitionResult::VacationStatusChanged {
                vacation: approved,
                previous_status: current.status(),
                last_vacation_end_date: Some(end_date),
            })
        }
        Command::RejectVacation {
            vacation_id,
            approved_by,
            reason,
        } => {
            validate_approver(&approved_by)?;
            let current: &Vacation = find_vacation(employee, vacation_id)?;
            let rejected: Vacation = current.reject(&approved_by, reason)?;

            Ok(TransitionResult::VacationStatusChanged {
                vacation: rejected,
                previous_status: current.status(),
                last_vacation_end_date: None,
            })
        }
        Command::CancelVacation { vacation_id } => {
            let current: &Vacation = find_vacation(employee, vacation_id)?;
            let cancelled: Vacation = current.cancel()?;

            Ok(TransitionResult::VacationStatusChanged {
                vacation: cancelled,
                previous_status: current.status(),
                last_vacation_end_date: None,
            })
        }
    }
}

/// Locates a vacation in the employee's history.
fn find_vacation(employee: Option<&Employee>, vacation_id: i64) -> Result<&Vacation, CoreError> {
    employee
        .and_then(|employee| {
            employee
                .vacations
                .iter()
                .find(|vacation| vacation.vacation_id() == Some(vacation_id))
        })
        .ok_or(CoreError::DomainViolation(DomainError::VacationNotFound {
            vacation_id,
        }))
}
