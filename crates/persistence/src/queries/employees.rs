// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use ferias_domain::{Employee, Vacation};
use tracing::debug;

use crate::data_models::{EmployeeRow, VacationRow};
use crate::diesel_schema::{employees, vacations};
use crate::error::PersistenceError;

/// Loads one employee with their complete vacation history.
///
/// Vacations are ordered by start date.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
/// Returns `Ok(None)` if the employee does not exist.
pub fn find_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<Employee>, PersistenceError> {
    debug!(employee_id, "Loading employee");

    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_employee: {e}")))?;

    let Some(row) = row else {
        return Ok(None);
    };

    let history: Vec<VacationRow> = vacations::table
        .filter(vacations::employee_id.eq(employee_id))
        .order((vacations::start_date.asc(), vacations::vacation_id.asc()))
        .select(VacationRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("find_employee history: {e}")))?;

    let vacations: Vec<Vacation> = history
        .into_iter()
        .map(VacationRow::into_domain)
        .collect::<Result<_, _>>()?;

    Ok(Some(row.into_domain(vacations)?))
}

/// Lists every employee, ordered by name, each with their vacation history.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_employees(conn: &mut SqliteConnection) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .order((employees::name.asc(), employees::employee_id.asc()))
        .select(EmployeeRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_employees: {e}")))?;

    let history: Vec<VacationRow> = vacations::table
        .order((vacations::start_date.asc(), vacations::vacation_id.asc()))
        .select(VacationRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_employees history: {e}")))?;

    let mut by_employee: HashMap<i64, Vec<Vacation>> = HashMap::new();
    for row in history {
        let vacation: Vacation = row.into_domain()?;
        by_employee
            .entry(vacation.employee_id())
            .or_default()
            .push(vacation);
    }

    rows.into_iter()
        .map(|row| {
            let vacations: Vec<Vacation> = by_employee.remove(&row.employee_id).unwrap_or_default();
            row.into_domain(vacations)
        })
        .collect()
}
