// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod transition_tests;

use ferias::{Command, TransitionContext, TransitionResult, apply};
use ferias_domain::{NationalHolidays, VacationRequest, VacationType};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{PersistTransitionResult, Persistence, PersistenceError};

pub const HIRE_DATE: Date = date!(2023 - 06 - 01);

/// The instant all fixtures treat as "now": Thursday 2025-01-02.
pub fn create_test_now() -> OffsetDateTime {
    datetime!(2025-01-02 10:00 UTC)
}

/// Computes a transition against the stored employee (if any).
pub fn compute(
    persistence: &mut Persistence,
    employee_id: Option<i64>,
    command: Command,
    now: OffsetDateTime,
) -> TransitionResult {
    let holidays: NationalHolidays = NationalHolidays::empty();
    let context = TransitionContext::new(now, &holidays);
    let employee = employee_id.and_then(|id| persistence.find_employee(id).unwrap());
    apply(employee.as_ref(), command, &context).expect("transition should be valid")
}

pub fn register_employee(persistence: &mut Persistence, name: &str, email: &str) -> i64 {
    let command: Command = Command::RegisterEmployee {
        name: String::from(name),
        email: String::from(email),
        position: String::from("Analista"),
        department: String::from("Financeiro"),
        hire_date: HIRE_DATE,
        unjustified_absences: 0,
        current_acquisitive_period_start: None,
    };
    let result: TransitionResult = compute(persistence, None, command, create_test_now());
    persistence
        .persist_transition(&result)
        .unwrap()
        .employee_id
        .unwrap()
}

pub fn submit_vacation_at(
    persistence: &mut Persistence,
    employee_id: i64,
    start: Date,
    end: Date,
    now: OffsetDateTime,
) -> i64 {
    let command: Command = Command::SubmitVacation {
        request: VacationRequest::new(employee_id, start, end, VacationType::Full),
    };
    let result: TransitionResult = compute(persistence, Some(employee_id), command, now);
    persistence
        .persist_transition(&result)
        .unwrap()
        .vacation_id
        .unwrap()
}

pub fn submit_vacation(
    persistence: &mut Persistence,
    employee_id: i64,
    start: Date,
    end: Date,
) -> i64 {
    submit_vacation_at(persistence, employee_id, start, end, create_test_now())
}

pub fn approve_vacation(
    persistence: &mut Persistence,
    employee_id: i64,
    vacation_id: i64,
) -> Result<PersistTransitionResult, PersistenceError> {
    let result: TransitionResult = compute(
        persistence,
        Some(employee_id),
        Command::ApproveVacation {
            vacation_id,
            approved_by: String::from("gestora@example.com"),
        },
        create_test_now(),
    );
    persistence.persist_transition(&result)
}

pub fn reject_vacation(
    persistence: &mut Persistence,
    employee_id: i64,
    vacation_id: i64,
) -> Result<PersistTransitionResult, PersistenceError> {
    let result: TransitionResult = compute(
        persistence,
        Some(employee_id),
        Command::RejectVacation {
            vacation_id,
            approved_by: String::from("gestora@example.com"),
            reason: Some(String::from("Fechamento contábil")),
        },
        create_test_now(),
    );
    persistence.persist_transition(&result)
}
