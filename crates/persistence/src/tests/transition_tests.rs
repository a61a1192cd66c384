// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for atomic transition persistence.
//!
//! Transitions computed from the same stored snapshot model two requests
//! racing each other; only the first may be written.

use ferias::{Command, TransitionResult};
use ferias_domain::{
    AcquisitivePeriod, Vacation, VacationRequest, VacationStatus, VacationType,
};
use time::macros::{date, datetime};

use super::{
    approve_vacation, compute, create_test_now, register_employee, reject_vacation,
    submit_vacation, submit_vacation_at,
};
use crate::{PersistTransitionResult, Persistence, PersistenceError};

#[test]
fn test_submitted_vacation_is_stored_pending() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let employee_id: i64 = register_employee(&mut persistence, "Ana Lima", "ana@example.com");

    let vacation_id: i64 = submit_vacation(
        &mut persistence,
        employee_id,
        date!(2025 - 01 - 06),
        date!(2025 - 02 - 04),
    );

    let vacation: Vacation = persistence.get_vacation(vacation_id).unwrap().unwrap();
    assert_eq!(vacation.vacation_id(), Some(vacation_id));
    assert_eq!(vacation.employee_id(), employee_id);
    assert_eq!(vacation.status(), VacationStatus::Pending);
    assert_eq!(vacation.days(), 30);
    assert_eq!(vacation.vacation_type(), VacationType::Full);
    assert_eq!(vacation.abono_days(), None);
    assert_eq!(vacation.requested_at(), create_test_now());
    assert_eq!(
        vacation.acquisitive_period(),
        AcquisitivePeriod {
            start: date!(2024 - 06 - 01),
            end: date!(2025 - 05 - 31),
        }
    );
}

#[test]
fn test_abono_is_stored() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let employee_id: i64 = register_employee(&mut persistence, "Ana Lima", "ana@example.com");
    let command: Command = Command::SubmitVacation {
        request: VacationRequest::new(
            employee_id,
            date!(2025 - 01 - 06),
            date!(2025 - 01 - 25),
            VacationType::Full,
        )
        .with_abono(Some(10)),
    };
    let result: TransitionResult =
        compute(&mut persistence, Some(employee_id), command, create_test_now());

    let persisted: PersistTransitionResult = persistence.persist_transition(&result).unwrap();

    let vacation: Vacation = persistence
        .get_vacation(persisted.vacation_id.unwrap())
        .unwrap()
        .unwrap();
    assert!(vacation.is_abono_pecuniario());
    assert_eq!(vacation.abono_days(), Some(10));
    assert_eq!(vacation.days(), 20);
}

#[test]
fn test_approval_stamps_decision() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let employee_id: i64 = register_employee(&mut persistence, "Ana Lima", "ana@example.com");
    let vacation_id: i64 = submit_vacation(
        &mut persistence,
        employee_id,
        date!(2025 - 01 - 06),
        date!(2025 - 02 - 04),
    );

    let persisted: PersistTransitionResult =
        approve_vacation(&mut persistence, employee_id, vacation_id).unwrap();
    assert_eq!(persisted.vacation_id, Some(vacation_id));

    let vacation: Vacation = persistence.get_vacation(vacation_id).unwrap().unwrap();
    assert_eq!(vacation.status(), VacationStatus::Approved);
    assert_eq!(vacation.approved_by(), Some("gestora@example.com"));
    assert_eq!(vacation.approved_at(), Some(create_test_now()));
    assert_eq!(vacation.rejected_reason(), None);
}

#[test]
fn test_rejection_records_reason() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let employee_id: i64 = register_employee(&mut persistence, "Ana Lima", "ana@example.com");
    let vacation_id: i64 = submit_vacation(
        &mut persistence,
        employee_id,
        date!(2025 - 01 - 06),
        date!(2025 - 02 - 04),
    );

    reject_vacation(&mut persistence, employee_id, vacation_id).unwrap();

    let vacation: Vacation = persistence.get_vacation(vacation_id).unwrap().unwrap();
    assert_eq!(vacation.status(), VacationStatus::Rejected);
    assert_eq!(vacation.rejected_reason(), Some("Fechamento contábil"));
    assert_eq!(
        persistence
            .find_employee(employee_id)
            .unwrap()
            .unwrap()
            .last_vacation_end_date,
        None
    );
}

#[test]
fn test_racing_decisions_only_first_applies() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let employee_id: i64 = register_employee(&mut persistence, "Ana Lima", "ana@example.com");
    let vacation_id: i64 = submit_vacation(
        &mut persistence,
        employee_id,
        date!(2025 - 01 - 06),
        date!(2025 - 02 - 04),
    );

    let approval: TransitionResult = compute(
        &mut persistence,
        Some(employee_id),
        Command::ApproveVacation {
            vacation_id,
            approved_by: String::from("gestora@example.com"),
        },
        create_test_now(),
    );
    let cancellation: TransitionResult = compute(
        &mut persistence,
        Some(employee_id),
        Command::CancelVacation { vacation_id },
        create_test_now(),
    );

    persistence.persist_transition(&cancellation).unwrap();

    assert_eq!(
        persistence.persist_transition(&approval),
        Err(PersistenceError::StaleStatus { vacation_id })
    );
    let vacation: Vacation = persistence.get_vacation(vacation_id).unwrap().unwrap();
    assert_eq!(vacation.status(), VacationStatus::Cancelled);
    // The failed approval must not leave the employee stamped
    assert_eq!(
        persistence
            .find_employee(employee_id)
            .unwrap()
            .unwrap()
            .last_vacation_end_date,
        None
    );
}

#[test]
fn test_racing_overlapping_submissions_only_first_is_stored() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let employee_id: i64 = register_employee(&mut persistence, "Ana Lima", "ana@example.com");

    let first: TransitionResult = compute(
        &mut persistence,
        Some(employee_id),
        Command::SubmitVacation {
            request: VacationRequest::new(
                employee_id,
                date!(2025 - 01 - 06),
                date!(2025 - 01 - 19),
                VacationType::Full,
            ),
        },
        create_test_now(),
    );
    let second: TransitionResult = compute(
        &mut persistence,
        Some(employee_id),
        Command::SubmitVacation {
            request: VacationRequest::new(
                employee_id,
                date!(2025 - 01 - 13),
                date!(2025 - 01 - 26),
                VacationType::Full,
            ),
        },
        create_test_now(),
    );

    let stored: PersistTransitionResult = persistence.persist_transition(&first).unwrap();

    assert_eq!(
        persistence.persist_transition(&second),
        Err(PersistenceError::OverlappingVacation {
            vacation_id: stored.vacation_id.unwrap()
        })
    );
    assert_eq!(
        persistence
            .list_vacations_for_employee(employee_id)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_cancelled_vacation_frees_its_dates() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let employee_id: i64 = register_employee(&mut persistence, "Ana Lima", "ana@example.com");
    let vacation_id: i64 = submit_vacation(
        &mut persistence,
        employee_id,
        date!(2025 - 01 - 06),
        date!(2025 - 01 - 19),
    );
    let cancellation: TransitionResult = compute(
        &mut persistence,
        Some(employee_id),
        Command::CancelVacation { vacation_id },
        create_test_now(),
    );
    persistence.persist_transition(&cancellation).unwrap();

    let replacement: i64 = submit_vacation_at(
        &mut persistence,
        employee_id,
        date!(2025 - 01 - 13),
        date!(2025 - 01 - 26),
        datetime!(2025-01-02 11:00 UTC),
    );

    assert_ne!(replacement, vacation_id);
}

#[test]
fn test_vacation_for_unknown_employee_is_not_written() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let vacation: Vacation = Vacation::new(
        42,
        date!(2025 - 01 - 06),
        date!(2025 - 01 - 19),
        VacationType::Full,
        None,
        AcquisitivePeriod::starting_at(date!(2024 - 06 - 01)).unwrap(),
        create_test_now(),
    )
    .unwrap();
    let result: TransitionResult = TransitionResult::VacationCreated {
        vacation,
        eligibility: ferias_domain::EligibleVacation {
            allowed_days: 30,
            requested_days: 14,
            abono_days: None,
            acquisitive_period: AcquisitivePeriod::starting_at(date!(2024 - 06 - 01)).unwrap(),
        },
    };

    assert!(persistence.persist_transition(&result).is_err());
    assert!(persistence.list_vacations().unwrap().is_empty());
}

#[test]
fn test_status_update_for_missing_row() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let employee_id: i64 = register_employee(&mut persistence, "Ana Lima", "ana@example.com");
    let vacation: Vacation = Vacation::with_id(
        77,
        employee_id,
        date!(2025 - 01 - 06),
        date!(2025 - 01 - 19),
        VacationType::Full,
        None,
        VacationStatus::Cancelled,
        AcquisitivePeriod::starting_at(date!(2024 - 06 - 01)).unwrap(),
        create_test_now(),
    )
    .unwrap();
    let result: TransitionResult = TransitionResult::VacationStatusChanged {
        vacation,
        previous_status: VacationStatus::Pending,
        last_vacation_end_date: None,
    };

    assert_eq!(
        persistence.persist_transition(&result),
        Err(PersistenceError::VacationNotFound(77))
    );
}
