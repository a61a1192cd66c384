// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vacation queries.
//!
//! Date columns hold ISO `YYYY-MM-DD` text, so lexical comparison matches
//! chronological order and range filters are expressed directly in SQL.

use diesel::SqliteConnection;
use diesel::prelude::*;
use ferias_domain::{Vacation, VacationStatus};
use time::Date;
use tracing::debug;

use crate::data_models::{VacationRow, VacationStats};
use crate::diesel_schema::vacations;
use crate::error::PersistenceError;

const ACTIVE_STATUSES: [&str; 2] = [
    VacationStatus::Pending.as_str(),
    VacationStatus::Approved.as_str(),
];

fn into_vacations(rows: Vec<VacationRow>) -> Result<Vec<Vacation>, PersistenceError> {
    rows.into_iter().map(VacationRow::into_domain).collect()
}

/// Retrieves a vacation by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
/// Returns `Ok(None)` if the vacation does not exist.
pub fn get_vacation(
    conn: &mut SqliteConnection,
    vacation_id: i64,
) -> Result<Option<Vacation>, PersistenceError> {
    debug!(vacation_id, "Loading vacation");

    let row: Option<VacationRow> = vacations::table
        .filter(vacations::vacation_id.eq(vacation_id))
        .select(VacationRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_vacation: {e}")))?;

    row.map(VacationRow::into_domain).transpose()
}

/// Lists all vacations, most recently requested first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_vacations(conn: &mut SqliteConnection) -> Result<Vec<Vacation>, PersistenceError> {
    let rows: Vec<VacationRow> = vacations::table
        .order((vacations::requested_at.desc(), vacations::vacation_id.desc()))
        .select(VacationRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_vacations: {e}")))?;

    into_vacations(rows)
}

/// Lists one employee's vacations, most recently requested first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_vacations_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<Vacation>, PersistenceError> {
    let rows: Vec<VacationRow> = vacations::table
        .filter(vacations::employee_id.eq(employee_id))
        .order((vacations::requested_at.desc(), vacations::vacation_id.desc()))
        .select(VacationRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_vacations_for_employee: {e}")))?;

    into_vacations(rows)
}

/// Lists approved vacations that touch `[start, end]`, ordered by start date.
///
/// A vacation touches the range if it starts in it, ends in it, or spans it.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_approved_vacations_in_range(
    conn: &mut SqliteConnection,
    start: Date,
    end: Date,
) -> Result<Vec<Vacation>, PersistenceError> {
    let rows: Vec<VacationRow> = vacations::table
        .filter(vacations::status.eq(VacationStatus::Approved.as_str()))
        .filter(vacations::start_date.le(end.to_string()))
        .filter(vacations::end_date.ge(start.to_string()))
        .order((vacations::start_date.asc(), vacations::vacation_id.asc()))
        .select(VacationRow::as_select())
        .load(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("list_approved_vacations_in_range: {e}"))
        })?;

    into_vacations(rows)
}

/// Returns the ID of a pending or approved vacation of `employee_id` that
/// overlaps `[start, end]`, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_overlapping_active_vacation(
    conn: &mut SqliteConnection,
    employee_id: i64,
    start: Date,
    end: Date,
) -> Result<Option<i64>, PersistenceError> {
    vacations::table
        .filter(vacations::employee_id.eq(employee_id))
        .filter(vacations::status.eq_any(ACTIVE_STATUSES))
        .filter(vacations::start_date.le(end.to_string()))
        .filter(vacations::end_date.ge(start.to_string()))
        .select(vacations::vacation_id)
        .first::<i64>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_overlapping_active_vacation: {e}")))
}

fn count_with_status(
    conn: &mut SqliteConnection,
    status: VacationStatus,
) -> Result<i64, PersistenceError> {
    vacations::table
        .filter(vacations::status.eq(status.as_str()))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count {status}: {e}")))
}

/// Counts vacations by status.
///
/// `upcoming` counts approved vacations whose start date lies in
/// `[today, upcoming_until]`.
///
/// # Errors
///
/// Returns an error if a count query fails.
pub fn vacation_stats(
    conn: &mut SqliteConnection,
    today: Date,
    upcoming_until: Date,
) -> Result<VacationStats, PersistenceError> {
    let total: i64 = vacations::table
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count total: {e}")))?;

    let upcoming: i64 = vacations::table
        .filter(vacations::status.eq(VacationStatus::Approved.as_str()))
        .filter(vacations::start_date.ge(today.to_string()))
        .filter(vacations::start_date.le(upcoming_until.to_string()))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count upcoming: {e}")))?;

    Ok(VacationStats {
        total,
        pending: count_with_status(conn, VacationStatus::Pending)?,
        approved: count_with_status(conn, VacationStatus::Approved)?,
        rejected: count_with_status(conn, VacationStatus::Rejected)?,
        upcoming,
    })
}
