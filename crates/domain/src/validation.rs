// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Employee;

/// Validates that an employee's basic field constraints are met.
///
/// This function checks that required fields are present and consistent.
/// It does NOT check for uniqueness (that requires context).
///
/// # Arguments
///
/// * `employee` - The employee to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidEmployee` if:
/// - The name, email, position or department is blank
/// - The email has no `@`
/// - The current acquisitive period starts before the hire date
pub fn validate_employee_fields(employee: &Employee) -> Result<(), DomainError> {
    let required: [(&str, &str); 4] = [
        ("name", &employee.name),
        ("email", &employee.email),
        ("position", &employee.position),
        ("department", &employee.department),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidEmployee(format!(
                "{field} cannot be empty"
            )));
        }
    }

    if !employee.email.contains('@') {
        return Err(DomainError::InvalidEmployee(format!(
            "'{}' is not a valid email address",
            employee.email
        )));
    }

    // Rule: acquisitive periods are counted from the hire date onwards
    if employee.current_acquisitive_period_start < employee.hire_date {
        return Err(DomainError::InvalidEmployee(format!(
            "current acquisitive period start {} precedes hire date {}",
            employee.current_acquisitive_period_start, employee.hire_date
        )));
    }

    Ok(())
}

/// Validates the identity recorded on a decision.
///
/// # Errors
///
/// Returns `DomainError::InvalidApprover` if the approver is blank.
pub fn validate_approver(approved_by: &str) -> Result<(), DomainError> {
    if approved_by.trim().is_empty() {
        return Err(DomainError::InvalidApprover);
    }
    Ok(())
}
