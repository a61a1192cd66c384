// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transition persistence.
//!
//! A `TransitionResult` is written in a single `BEGIN IMMEDIATE`
//! transaction. Taking the write lock up front means the overlap re-check
//! and the insert of a new vacation cannot interleave with another writer,
//! and a status change is applied only to the status it was computed from.

use diesel::SqliteConnection;
use ferias::TransitionResult;
use tracing::{debug, info, warn};

use crate::error::PersistenceError;
use crate::mutations::employees::{
    insert_employee, set_last_vacation_end_date, update_unjustified_absences,
};
use crate::mutations::vacations::{insert_vacation, update_vacation_status};
use crate::queries::vacations::find_overlapping_active_vacation;

/// Identifiers produced or touched by a persisted transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The employee the transition belongs to.
    pub employee_id: Option<i64>,
    /// The vacation created or updated, if any.
    pub vacation_id: Option<i64>,
}

/// Persists a transition result atomically.
///
/// # Errors
///
/// Returns an error if:
/// - A new vacation overlaps an active vacation stored since validation
///   (`OverlappingVacation`)
/// - A status change targets a vacation whose status changed since it was
///   loaded (`StaleStatus`)
/// - The employee email is already registered (`DuplicateEmail`)
/// - Any statement fails
///
/// Nothing is written when an error is returned.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    let persisted: PersistTransitionResult =
        conn.immediate_transaction::<_, PersistenceError, _>(|conn| match result {
            TransitionResult::EmployeeRegistered { employee } => {
                let employee_id: i64 = insert_employee(conn, employee)?;
                Ok(PersistTransitionResult {
                    employee_id: Some(employee_id),
                    vacation_id: None,
                })
            }
            TransitionResult::AbsencesRecorded {
                employee_id,
                unjustified_absences,
            } => {
                update_unjustified_absences(conn, *employee_id, *unjustified_absences)?;
                Ok(PersistTransitionResult {
                    employee_id: Some(*employee_id),
                    vacation_id: None,
                })
            }
            TransitionResult::VacationCreated { vacation, .. } => {
                if let Some(conflicting_id) = find_overlapping_active_vacation(
                    conn,
                    vacation.employee_id(),
                    vacation.start_date(),
                    vacation.end_date(),
                )? {
                    warn!(
                        employee_id = vacation.employee_id(),
                        conflicting_id, "Overlapping vacation written concurrently"
                    );
                    return Err(PersistenceError::OverlappingVacation {
                        vacation_id: conflicting_id,
                    });
                }

                let vacation_id: i64 = insert_vacation(conn, vacation)?;
                Ok(PersistTransitionResult {
                    employee_id: Some(vacation.employee_id()),
                    vacation_id: Some(vacation_id),
                })
            }
            TransitionResult::VacationStatusChanged {
                vacation,
                previous_status,
                last_vacation_end_date,
            } => {
                update_vacation_status(conn, vacation, *previous_status)?;

                if let Some(end_date) = last_vacation_end_date {
                    set_last_vacation_end_date(conn, vacation.employee_id(), *end_date)?;
                    debug!(
                        employee_id = vacation.employee_id(),
                        %end_date,
                        "Updated last vacation end date"
                    );
                }

                Ok(PersistTransitionResult {
                    employee_id: Some(vacation.employee_id()),
                    vacation_id: vacation.vacation_id(),
                })
            }
        })?;

    info!(
        employee_id = ?persisted.employee_id,
        vacation_id = ?persisted.vacation_id,
        "Persisted transition"
    );

    Ok(persisted)
}
