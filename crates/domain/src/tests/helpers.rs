// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AcquisitivePeriod, Employee, Vacation, VacationStatus, VacationType,
    resolve_acquisitive_period,
};
use time::macros::datetime;
use time::{Date, OffsetDateTime};

pub fn create_test_timestamp() -> OffsetDateTime {
    datetime!(2024-12-20 09:30 UTC)
}

/// An employee with the current acquisitive period set from `today`.
pub fn create_test_employee(hire_date: Date, unjustified_absences: u32, today: Date) -> Employee {
    let current: AcquisitivePeriod = resolve_acquisitive_period(hire_date, today).unwrap();
    Employee::new(
        String::from("Maria Silva"),
        String::from("maria.silva@example.com"),
        String::from("Analista"),
        String::from("Financeiro"),
        hire_date,
        unjustified_absences,
        current.start,
    )
    .with_id(1)
}

pub fn create_test_vacation(
    vacation_id: i64,
    start_date: Date,
    end_date: Date,
    vacation_type: VacationType,
    status: VacationStatus,
) -> Vacation {
    let hire_date: Date = time::macros::date!(2020 - 01 - 01);
    Vacation::with_id(
        vacation_id,
        1,
        start_date,
        end_date,
        vacation_type,
        None,
        status,
        resolve_acquisitive_period(hire_date, start_date).unwrap(),
        create_test_timestamp(),
    )
    .unwrap()
}
