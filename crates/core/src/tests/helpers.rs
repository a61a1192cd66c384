// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ferias_domain::{
    Employee, Vacation, VacationStatus, VacationType, resolve_acquisitive_period,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const HIRE_DATE: Date = date!(2023 - 06 - 01);

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2025-01-02 10:00 UTC)
}

pub fn create_test_employee() -> Employee {
    Employee::new(
        String::from("João Souza"),
        String::from("joao.souza@example.com"),
        String::from("Desenvolvedor"),
        String::from("Tecnologia"),
        HIRE_DATE,
        0,
        date!(2024 - 06 - 01),
    )
    .with_id(1)
}

pub fn create_test_vacation(vacation_id: i64, start: Date, end: Date, status: VacationStatus) -> Vacation {
    Vacation::with_id(
        vacation_id,
        1,
        start,
        end,
        VacationType::Full,
        None,
        status,
        resolve_acquisitive_period(HIRE_DATE, start).unwrap(),
        datetime!(2024-12-15 08:00 UTC),
    )
    .unwrap()
}

pub fn create_employee_with_vacation(status: VacationStatus) -> Employee {
    let mut employee: Employee = create_test_employee();
    employee.vacations.push(create_test_vacation(
        5,
        date!(2025 - 01 - 06),
        date!(2025 - 02 - 04),
        status,
    ));
    employee
}
