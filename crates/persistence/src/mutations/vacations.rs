// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use ferias_domain::{Vacation, VacationStatus};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewVacation, format_timestamp};
use crate::diesel_schema::vacations;
use crate::error::PersistenceError;

/// Inserts a new vacation and returns the assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails (including a foreign key violation
/// when the employee does not exist).
pub fn insert_vacation(
    conn: &mut SqliteConnection,
    vacation: &Vacation,
) -> Result<i64, PersistenceError> {
    let record: NewVacation<'_> = NewVacation::from_domain(vacation)?;

    diesel::insert_into(vacations::table)
        .values(&record)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_vacation: {e}")))?;

    let vacation_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        vacation_id,
        employee_id = vacation.employee_id(),
        start_date = %vacation.start_date(),
        end_date = %vacation.end_date(),
        "Vacation request created"
    );

    Ok(vacation_id)
}

/// Writes the decision fields of `vacation`, provided the stored status is
/// still `expected_status`.
///
/// # Errors
///
/// Returns `StaleStatus` if the stored status changed since it was loaded,
/// `VacationNotFound` if the row is gone, or a query error.
pub fn update_vacation_status(
    conn: &mut SqliteConnection,
    vacation: &Vacation,
    expected_status: VacationStatus,
) -> Result<(), PersistenceError> {
    let Some(vacation_id) = vacation.vacation_id() else {
        return Err(PersistenceError::Other(String::from(
            "Cannot update the status of an unsaved vacation",
        )));
    };

    let approved_at: Option<String> = vacation.approved_at().map(format_timestamp).transpose()?;

    let updated: usize = diesel::update(vacations::table)
        .filter(vacations::vacation_id.eq(vacation_id))
        .filter(vacations::status.eq(expected_status.as_str()))
        .set((
            vacations::status.eq(vacation.status().as_str()),
            vacations::approved_by.eq(vacation.approved_by()),
            vacations::approved_at.eq(approved_at),
            vacations::rejected_reason.eq(vacation.rejected_reason()),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_vacation_status: {e}")))?;

    if updated == 0 {
        let exists: bool = diesel::select(diesel::dsl::exists(
            vacations::table.filter(vacations::vacation_id.eq(vacation_id)),
        ))
        .get_result(conn)?;
        return Err(if exists {
            PersistenceError::StaleStatus { vacation_id }
        } else {
            PersistenceError::VacationNotFound(vacation_id)
        });
    }

    info!(
        vacation_id,
        from = %expected_status,
        to = %vacation.status(),
        "Vacation status updated"
    );
    Ok(())
}
