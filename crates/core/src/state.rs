// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ferias_domain::{EligibleVacation, Employee, HolidayCalendar, Vacation, VacationStatus};
use time::{Date, OffsetDateTime};

/// Inputs a transition needs besides the employee record.
///
/// The clock and holiday calendar are supplied by the caller so that
/// transitions stay deterministic.
pub struct TransitionContext<'a, H> {
    /// The current instant.
    pub now: OffsetDateTime,
    /// National holidays covering the dates under validation.
    pub holidays: &'a H,
}

impl<'a, H: HolidayCalendar> TransitionContext<'a, H> {
    /// Creates a new context.
    #[must_use]
    pub const fn new(now: OffsetDateTime, holidays: &'a H) -> Self {
        Self { now, holidays }
    }

    /// The current calendar date.
    #[must_use]
    pub const fn today(&self) -> Date {
        self.now.date()
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
/// The persistence layer applies the whole result in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// A new employee is ready to be stored.
    EmployeeRegistered {
        /// The employee, without an identifier yet.
        employee: Employee,
    },
    /// An employee's absence count changed.
    AbsencesRecorded {
        /// The employee.
        employee_id: i64,
        /// The new absence count.
        unjustified_absences: u32,
    },
    /// A validated vacation is ready to be stored.
    VacationCreated {
        /// The new pending vacation, without an identifier yet.
        vacation: Vacation,
        /// The eligibility outcome that admitted it.
        eligibility: EligibleVacation,
    },
    /// A vacation changed status.
    VacationStatusChanged {
        /// The vacation after the change.
        vacation: Vacation,
        /// The status the change was applied to.
        previous_status: VacationStatus,
        /// Set on approval: the employee's new last vacation end date.
        last_vacation_end_date: Option<Date>,
    },
}

impl TransitionResult {
    /// The employee the transition belongs to, once persisted.
    #[must_use]
    pub const fn employee_id(&self) -> Option<i64> {
        match self {
            Self::EmployeeRegistered { employee } => employee.employee_id,
            Self::AbsencesRecorded { employee_id, .. } => Some(*employee_id),
            Self::VacationCreated { vacation, .. } | Self::VacationStatusChanged { vacation, .. } => {
                Some(vacation.employee_id())
            }
        }
    }
}
