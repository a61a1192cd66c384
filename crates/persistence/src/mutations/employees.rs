// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use ferias_domain::Employee;
use time::Date;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewEmployee, absences_column};
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Inserts a new employee and returns the assigned ID.
///
/// # Errors
///
/// Returns `DuplicateEmail` if the email is already registered, or a query
/// error if the insert fails.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<i64, PersistenceError> {
    let record: NewEmployee<'_> = NewEmployee::from_domain(employee)?;

    diesel::insert_into(employees::table)
        .values(&record)
        .execute(conn)
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::DuplicateEmail(employee.email.clone())
            }
            other => PersistenceError::QueryFailed(format!("insert_employee: {other}")),
        })?;

    let employee_id: i64 = conn.get_last_insert_rowid()?;
    info!(employee_id, email = %employee.email, "Employee created");

    Ok(employee_id)
}

/// Replaces the unjustified-absence count of an employee.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if no row was updated.
pub fn update_unjustified_absences(
    conn: &mut SqliteConnection,
    employee_id: i64,
    unjustified_absences: u32,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set(employees::unjustified_absences.eq(absences_column(unjustified_absences)?))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_unjustified_absences: {e}")))?;

    if updated == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }

    info!(employee_id, unjustified_absences, "Absences recorded");
    Ok(())
}

/// Records the end date of the employee's most recently approved vacation.
///
/// # Errors
///
/// Returns `EmployeeNotFound` if no row was updated.
pub fn set_last_vacation_end_date(
    conn: &mut SqliteConnection,
    employee_id: i64,
    end_date: Date,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set(employees::last_vacation_end_date.eq(Some(end_date.to_string())))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("set_last_vacation_end_date: {e}")))?;

    if updated == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }
    Ok(())
}
