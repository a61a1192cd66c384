// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions to domain values.
//!
//! Dates are stored as `YYYY-MM-DD` text and timestamps as RFC 3339 text.
//! Conversion failures surface as `PersistenceError::ReconstructionError`
//! because a row that cannot be read back indicates a corrupted store.

use diesel::prelude::*;
use ferias_domain::{
    AcquisitivePeriod, DomainError, Employee, Vacation, VacationStatus, VacationType, parse_date,
};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::diesel_schema::{employees, vacations};
use crate::error::PersistenceError;

/// Diesel Queryable struct for employee rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub hire_date: String,
    pub unjustified_absences: i32,
    pub current_acquisitive_period_start: String,
    pub last_vacation_end_date: Option<String>,
}

/// Insertable employee record.
#[derive(Debug, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployee<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub position: &'a str,
    pub department: &'a str,
    pub hire_date: String,
    pub unjustified_absences: i32,
    pub current_acquisitive_period_start: String,
    pub last_vacation_end_date: Option<String>,
}

/// Diesel Queryable struct for vacation rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = vacations)]
pub struct VacationRow {
    pub vacation_id: i64,
    pub employee_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub days: i32,
    pub vacation_type: String,
    pub is_abono_pecuniario: i32,
    pub abono_days: Option<i32>,
    pub status: String,
    pub requested_at: String,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub rejected_reason: Option<String>,
    pub acquisitive_period_start: String,
    pub acquisitive_period_end: String,
}

/// Insertable vacation record.
#[derive(Debug, Insertable)]
#[diesel(table_name = vacations)]
pub struct NewVacation<'a> {
    pub employee_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub days: i32,
    pub vacation_type: &'static str,
    pub is_abono_pecuniario: i32,
    pub abono_days: Option<i32>,
    pub status: &'static str,
    pub requested_at: String,
    pub approved_by: Option<&'a str>,
    pub approved_at: Option<String>,
    pub rejected_reason: Option<&'a str>,
    pub acquisitive_period_start: String,
    pub acquisitive_period_end: String,
}

/// Vacation counts by status for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    /// Approved vacations starting within the upcoming window.
    pub upcoming: i64,
}

/// Formats a timestamp for storage, normalized to UTC so stored values
/// sort chronologically as text.
///
/// # Errors
///
/// Returns `SerializationError` if the timestamp cannot be formatted.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("timestamp: {e}")))
}

/// Converts an absence count to its column type.
///
/// # Errors
///
/// Returns `SerializationError` if the count exceeds the column range.
pub fn absences_column(unjustified_absences: u32) -> Result<i32, PersistenceError> {
    unjustified_absences.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!(
            "unjustified_absences: {unjustified_absences} out of range"
        ))
    })
}

fn read_date(column: &str, value: &str) -> Result<Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::ReconstructionError(format!("{column}: {e}")))
}

fn read_timestamp(column: &str, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::ReconstructionError(format!("{column}: {e}")))
}

impl<'a> NewEmployee<'a> {
    /// Builds the insert record for a validated, not-yet-persisted employee.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the absence count does not fit the column.
    pub fn from_domain(employee: &'a Employee) -> Result<Self, PersistenceError> {
        Ok(Self {
            name: &employee.name,
            email: &employee.email,
            position: &employee.position,
            department: &employee.department,
            hire_date: employee.hire_date.to_string(),
            unjustified_absences: absences_column(employee.unjustified_absences)?,
            current_acquisitive_period_start: employee
                .current_acquisitive_period_start
                .to_string(),
            last_vacation_end_date: employee.last_vacation_end_date.map(|d| d.to_string()),
        })
    }
}

impl<'a> NewVacation<'a> {
    /// Builds the insert record for a vacation that has no identifier yet.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if a timestamp cannot be formatted.
    pub fn from_domain(vacation: &'a Vacation) -> Result<Self, PersistenceError> {
        let period: AcquisitivePeriod = vacation.acquisitive_period();
        Ok(Self {
            employee_id: vacation.employee_id(),
            start_date: vacation.start_date().to_string(),
            end_date: vacation.end_date().to_string(),
            days: i32::from(vacation.days()),
            vacation_type: vacation.vacation_type().as_str(),
            is_abono_pecuniario: i32::from(vacation.is_abono_pecuniario()),
            abono_days: vacation.abono_days().map(i32::from),
            status: vacation.status().as_str(),
            requested_at: format_timestamp(vacation.requested_at())?,
            approved_by: vacation.approved_by(),
            approved_at: vacation.approved_at().map(format_timestamp).transpose()?,
            rejected_reason: vacation.rejected_reason(),
            acquisitive_period_start: period.start.to_string(),
            acquisitive_period_end: period.end.to_string(),
        })
    }
}

impl EmployeeRow {
    /// Rebuilds the domain employee together with its vacation history.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructionError` if a stored column is malformed.
    pub fn into_domain(self, vacations: Vec<Vacation>) -> Result<Employee, PersistenceError> {
        let unjustified_absences: u32 = self.unjustified_absences.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "unjustified_absences: {} is negative",
                self.unjustified_absences
            ))
        })?;
        let last_vacation_end_date: Option<Date> = self
            .last_vacation_end_date
            .as_deref()
            .map(|value| read_date("last_vacation_end_date", value))
            .transpose()?;

        let mut employee: Employee = Employee::new(
            self.name,
            self.email,
            self.position,
            self.department,
            read_date("hire_date", &self.hire_date)?,
            unjustified_absences,
            read_date(
                "current_acquisitive_period_start",
                &self.current_acquisitive_period_start,
            )?,
        )
        .with_id(self.employee_id);
        employee.last_vacation_end_date = last_vacation_end_date;
        employee.vacations = vacations;
        Ok(employee)
    }
}

impl VacationRow {
    /// Rebuilds the domain vacation.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructionError` if a stored column is malformed.
    pub fn into_domain(self) -> Result<Vacation, PersistenceError> {
        let vacation_id: i64 = self.vacation_id;
        let reconstruction = move |e: DomainError| {
            PersistenceError::ReconstructionError(format!("vacation {vacation_id}: {e}"))
        };

        let vacation_type: VacationType = self.vacation_type.parse().map_err(reconstruction)?;
        let status: VacationStatus = self.status.parse().map_err(reconstruction)?;
        let abono_days: Option<u16> = match self.abono_days {
            Some(days) => Some(days.to_u16().ok_or_else(|| {
                PersistenceError::ReconstructionError(format!("abono_days: {days} out of range"))
            })?),
            None => None,
        };
        if (self.is_abono_pecuniario != 0) != abono_days.is_some() {
            return Err(PersistenceError::ReconstructionError(format!(
                "vacation {vacation_id}: abono flag disagrees with abono_days"
            )));
        }
        let acquisitive_period: AcquisitivePeriod = AcquisitivePeriod {
            start: read_date("acquisitive_period_start", &self.acquisitive_period_start)?,
            end: read_date("acquisitive_period_end", &self.acquisitive_period_end)?,
        };
        let approved_at: Option<OffsetDateTime> = self
            .approved_at
            .as_deref()
            .map(|value| read_timestamp("approved_at", value))
            .transpose()?;

        let vacation: Vacation = Vacation::with_id(
            vacation_id,
            self.employee_id,
            read_date("start_date", &self.start_date)?,
            read_date("end_date", &self.end_date)?,
            vacation_type,
            abono_days,
            status,
            acquisitive_period,
            read_timestamp("requested_at", &self.requested_at)?,
        )
        .map_err(reconstruction)?;
        if i32::from(vacation.days()) != self.days {
            return Err(PersistenceError::ReconstructionError(format!(
                "vacation {vacation_id}: stored {} days but the range spans {}",
                self.days,
                vacation.days()
            )));
        }

        Ok(vacation.with_decision(self.approved_by, approved_at, self.rejected_reason))
    }
}
