// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names are camelCase on the wire. Dates travel as `YYYY-MM-DD`
//! strings and timestamps as RFC 3339 strings; parsing happens in the
//! handlers so that malformed values become `InvalidInput` errors.

use serde::{Deserialize, Serialize};

/// API request to submit a vacation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVacationRequest {
    /// The employee taking the vacation.
    pub employee_id: i64,
    /// First day of vacation (ISO 8601).
    pub start_date: String,
    /// Last day of vacation, inclusive (ISO 8601).
    pub end_date: String,
    /// `Total` or `Parcial`.
    #[serde(rename = "type")]
    pub vacation_type: String,
    /// Whether part of the entitlement is sold.
    #[serde(default)]
    pub is_abono_pecuniario: bool,
    /// Days sold when `is_abono_pecuniario` is set.
    #[serde(default)]
    pub abono_days: Option<u16>,
}

/// API request to decide a pending vacation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVacationStatusRequest {
    /// `Aprovada` or `Rejeitada`.
    pub status: String,
    /// Who made the decision.
    pub approved_by: String,
    /// Optional reason, recorded on rejection.
    #[serde(default)]
    pub rejected_reason: Option<String>,
}

/// API request to register an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    /// Hire date (ISO 8601).
    pub hire_date: String,
    #[serde(default)]
    pub unjustified_absences: u32,
    /// Start of the acquisitive period currently accruing (ISO 8601).
    /// Derived from the hire date when omitted.
    #[serde(default)]
    pub current_acquisitive_period_start: Option<String>,
}

/// API request to replace an employee's unjustified-absence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAbsencesRequest {
    pub unjustified_absences: u32,
}

/// Employee fields embedded in vacation responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
}

/// A vacation as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationResponse {
    pub id: i64,
    pub employee_id: i64,
    pub start_date: String,
    pub end_date: String,
    /// Inclusive calendar days.
    pub days: u16,
    /// Weekdays within the range.
    pub business_days: u16,
    #[serde(rename = "type")]
    pub vacation_type: String,
    pub is_abono_pecuniario: bool,
    pub abono_days: Option<u16>,
    pub status: String,
    pub requested_at: String,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub rejected_reason: Option<String>,
    pub acquisitive_period_start: String,
    pub acquisitive_period_end: String,
    /// The employee, when still on record.
    pub employee: Option<EmployeeSummary>,
}

/// Dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationStatsResponse {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    /// Approved vacations starting within the next 30 days.
    pub upcoming: i64,
}

/// Approved vacations touching a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u8,
    pub vacations: Vec<VacationResponse>,
}

/// Entitlement figures derived for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementSummary {
    /// Days owed for the current acquisitive period.
    pub entitled_days: u16,
    /// Most days that may be sold as abono pecuniário.
    pub max_abono_days: u16,
    pub acquisitive_period_start: String,
    pub acquisitive_period_end: String,
    /// Last day on which vacation for the current period may start.
    pub concessive_period_end: String,
    /// Last day on which abono pecuniário may be requested.
    pub abono_deadline: String,
    /// Acquisitive periods whose concessive window closed unused.
    pub expired_periods: usize,
}

/// An employee as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub hire_date: String,
    pub unjustified_absences: u32,
    pub current_acquisitive_period_start: String,
    pub last_vacation_end_date: Option<String>,
    /// Number of vacation requests on record, in any status.
    pub vacation_count: usize,
    pub entitlement: EntitlementSummary,
}
