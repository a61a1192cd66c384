// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use ferias_domain::NationalHolidays;
use ferias_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    CreateEmployeeRequest, EmployeeResponse, SubmitVacationRequest, UpdateVacationStatusRequest,
    VacationResponse, create_employee, submit_vacation_request,
};

/// Thursday 2025-01-02, 10:00 UTC.
pub fn create_test_now() -> OffsetDateTime {
    datetime!(2025-01-02 10:00 UTC)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_employee_request(name: &str, email: &str) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        name: String::from(name),
        email: String::from(email),
        position: String::from("Desenvolvedora"),
        department: String::from("TI"),
        hire_date: String::from("2023-06-01"),
        unjustified_absences: 0,
        current_acquisitive_period_start: None,
    }
}

pub fn create_test_employee(persistence: &mut Persistence) -> EmployeeResponse {
    create_employee(
        persistence,
        create_employee_request("Maria Santos", "maria.santos@empresa.com"),
        create_test_now(),
    )
    .unwrap()
}

pub fn create_submit_request(employee_id: i64, start: &str, end: &str) -> SubmitVacationRequest {
    SubmitVacationRequest {
        employee_id,
        start_date: String::from(start),
        end_date: String::from(end),
        vacation_type: String::from("Total"),
        is_abono_pecuniario: false,
        abono_days: None,
    }
}

pub fn submit(
    persistence: &mut Persistence,
    employee_id: i64,
    start: &str,
    end: &str,
) -> VacationResponse {
    submit_vacation_request(
        persistence,
        &NationalHolidays::empty(),
        &create_submit_request(employee_id, start, end),
        create_test_now(),
    )
    .unwrap()
}

pub fn approval_request() -> UpdateVacationStatusRequest {
    UpdateVacationStatusRequest {
        status: String::from("Aprovada"),
        approved_by: String::from("gestor@empresa.com"),
        rejected_reason: None,
    }
}
