// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the vacation service.
//!
//! Handlers translate request DTOs into core commands, persist the
//! resulting transitions, and translate every lower-layer error into an
//! [`ApiError`]. They are synchronous and transport-agnostic; the server
//! crate wraps them in HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    UPCOMING_WINDOW_DAYS, cancel_vacation, create_employee, get_employee, get_vacation,
    get_vacation_calendar, get_vacation_stats, list_employee_vacations, list_employees,
    list_vacations, submit_vacation_request, update_unjustified_absences, update_vacation_status,
};
pub use request_response::{
    CalendarResponse, CreateEmployeeRequest, EmployeeResponse, EmployeeSummary,
    EntitlementSummary, SubmitVacationRequest, UpdateAbsencesRequest,
    UpdateVacationStatusRequest, VacationResponse, VacationStatsResponse,
};
