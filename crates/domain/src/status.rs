// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vacation status tracking and transition logic.
//!
//! A vacation request is created `Pendente` and is the only state that
//! accepts a transition. Decisions and cancellations are always explicit;
//! the system never advances status based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a vacation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VacationStatus {
    /// Awaiting a decision
    #[serde(rename = "Pendente")]
    Pending,
    /// Approved by a manager
    #[serde(rename = "Aprovada")]
    Approved,
    /// Rejected by a manager
    #[serde(rename = "Rejeitada")]
    Rejected,
    /// Withdrawn before a decision
    #[serde(rename = "Cancelada")]
    Cancelled,
}

impl VacationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Approved => "Aprovada",
            Self::Rejected => "Rejeitada",
            Self::Cancelled => "Cancelada",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidVacationStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Pendente" => Ok(Self::Pending),
            "Aprovada" => Ok(Self::Approved),
            "Rejeitada" => Ok(Self::Rejected),
            "Cancelada" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidVacationStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true if a vacation in this status still blocks its date range.
    ///
    /// Rejected and cancelled requests free their dates.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` when cancelling an approved vacation or when the
    ///   target is `Pendente`.
    /// - `AlreadyProcessed` for any other transition out of a terminal state.
    pub const fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        match (*self, new_status) {
            (Self::Pending, Self::Approved | Self::Rejected | Self::Cancelled) => Ok(()),
            (Self::Pending, Self::Pending) | (Self::Approved, Self::Cancelled) => {
                Err(DomainError::InvalidTransition {
                    from: *self,
                    to: new_status,
                })
            }
            (status, _) => Err(DomainError::AlreadyProcessed { status }),
        }
    }
}

impl std::fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VacationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
