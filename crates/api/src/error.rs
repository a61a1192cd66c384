// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use ferias::CoreError;
use ferias_domain::DomainError;
use ferias_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// Stable `snake_case` key of the violated rule.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

fn rule(key: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(key),
        message,
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// Eligibility and lifecycle failures keep a stable rule key so clients can
/// react to a specific rule without parsing the message.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::EmployeeNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message,
        },
        DomainError::VacationNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Vacation"),
            message,
        },
        DomainError::EntitlementExhausted { .. } => rule("entitlement_exhausted", message),
        DomainError::ExceedsEntitlement { .. } => rule("exceeds_entitlement", message),
        DomainError::InvalidStartDate { .. } => rule("invalid_start_date", message),
        DomainError::AbonoDaysMissing => rule("abono_days_missing", message),
        DomainError::AbonoExceedsOneThird { .. } => rule("abono_exceeds_one_third", message),
        DomainError::AbonoSumMismatch { .. } => rule("abono_sum_mismatch", message),
        DomainError::AbonoDeadlinePassed { .. } => rule("abono_deadline_passed", message),
        DomainError::PeriodTooShort { .. } => rule("period_too_short", message),
        DomainError::FirstPeriodTooShort { .. } => rule("first_period_too_short", message),
        DomainError::OverlappingPeriod { .. } => rule("overlapping_period", message),
        DomainError::AcquisitivePeriodNotMet { .. } => {
            rule("acquisitive_period_not_met", message)
        }
        DomainError::TooManyExpiredPeriods { .. } => rule("too_many_expired_periods", message),
        DomainError::AlreadyProcessed { .. } => rule("already_processed", message),
        DomainError::InvalidTransition { .. } => rule("invalid_transition", message),
        DomainError::InvalidDateRange { .. } => invalid("endDate", message),
        DomainError::InvalidVacationType(_) => invalid("type", message),
        DomainError::InvalidVacationStatus(_) => invalid("status", message),
        DomainError::InvalidEmployee(reason) => invalid("employee", reason),
        DomainError::InvalidApprover => invalid("approvedBy", message),
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            invalid("date", message)
        }
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Conflicts detected while writing map onto the same rules the validator
/// reports; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EmployeeNotFound(employee_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_id} does not exist"),
        },
        PersistenceError::VacationNotFound(vacation_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Vacation"),
            message: format!("Vacation {vacation_id} does not exist"),
        },
        PersistenceError::DuplicateEmail(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: err.to_string(),
        },
        PersistenceError::OverlappingVacation { .. } => ApiError::DomainRuleViolation {
            rule: String::from("overlapping_period"),
            message: err.to_string(),
        },
        PersistenceError::StaleStatus { .. } => ApiError::DomainRuleViolation {
            rule: String::from("already_processed"),
            message: err.to_string(),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
