// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ferias_domain::VacationRequest;
use time::Date;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a new employee.
    RegisterEmployee {
        /// The employee's name.
        name: String,
        /// The employee's email address.
        email: String,
        /// The employee's position.
        position: String,
        /// The employee's department.
        department: String,
        /// The hire date.
        hire_date: Date,
        /// Unjustified absences already recorded.
        unjustified_absences: u32,
        /// Start of the acquisitive period currently accruing.
        /// Derived from the hire date when omitted.
        current_acquisitive_period_start: Option<Date>,
    },
    /// Replace an employee's unjustified-absence count.
    RecordAbsences {
        /// The employee.
        employee_id: i64,
        /// The new absence count.
        unjustified_absences: u32,
    },
    /// Submit a vacation request.
    SubmitVacation {
        /// The request to validate.
        request: VacationRequest,
    },
    /// Approve a pending vacation.
    ApproveVacation {
        /// The vacation to approve.
        vacation_id: i64,
        /// Who approved it.
        approved_by: String,
    },
    /// Reject a pending vacation.
    RejectVacation {
        /// The vacation to reject.
        vacation_id: i64,
        /// Who rejected it.
        approved_by: String,
        /// Why it was rejected.
        reason: Option<String>,
    },
    /// Cancel a pending vacation.
    CancelVacation {
        /// The vacation to cancel.
        vacation_id: i64,
    },
}
