// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod acquisitive;
mod dates;
mod eligibility;
mod entitlement;
mod error;
mod holidays;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use acquisitive::{
    AcquisitiveBlock, AcquisitivePeriod, acquisitive_blocks, count_expired_periods,
    resolve_acquisitive_period,
};
pub use dates::{add_years, business_days, calendar_days, months_between, parse_date};
pub use eligibility::{
    ABONO_DEADLINE_DAYS, EligibleVacation, FIRST_PARTIAL_MINIMUM_DAYS, MAX_EXPIRED_PERIODS,
    PARTIAL_MINIMUM_DAYS, REQUIRED_SERVICE_MONTHS, StartDateRestriction, check_abono,
    check_acquisitive_period_met, check_entitlement, check_expired_periods, check_fractionation,
    check_no_overlap, check_start_date, validate_vacation_request,
};
pub use entitlement::{entitled_days, max_abono_days};
pub use error::DomainError;
pub use holidays::{HolidayCalendar, NationalHolidays};
pub use status::VacationStatus;
pub use types::{Employee, Vacation, VacationRequest, VacationType};
pub use validation::{validate_approver, validate_employee_fields};
