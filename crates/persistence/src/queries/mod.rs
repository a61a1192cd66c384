// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `employees`: employee lookup with vacation history
//! - `vacations`: vacation lookup, listings, overlap check and counts

pub mod employees;
pub mod vacations;

pub use employees::{find_employee, list_employees};
pub use vacations::{
    find_overlapping_active_vacation, get_vacation, list_approved_vacations_in_range,
    list_vacations, list_vacations_for_employee, vacation_stats,
};
