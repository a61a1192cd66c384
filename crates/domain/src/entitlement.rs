// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Annual vacation entitlement.
//!
//! The number of calendar days an employee may take is reduced in bands
//! by the unjustified absences recorded during the acquisitive period
//! (CLT art. 130). More than 32 absences forfeit the vacation entirely.

/// Calculates the vacation days an employee is entitled to.
///
/// | Unjustified absences | Days |
/// |---|---|
/// | 0 to 5 | 30 |
/// | 6 to 14 | 24 |
/// | 15 to 23 | 18 |
/// | 24 to 32 | 12 |
/// | 33 or more | 0 |
///
/// # Arguments
///
/// * `unjustified_absences` - Absences recorded in the acquisitive period
///
/// # Returns
///
/// The entitled calendar days. Non-increasing in the absence count.
#[must_use]
pub const fn entitled_days(unjustified_absences: u32) -> u16 {
    match unjustified_absences {
        0..=5 => 30,
        6..=14 => 24,
        15..=23 => 18,
        24..=32 => 12,
        _ => 0,
    }
}

/// Maximum days that may be converted into abono pecuniário.
///
/// One third of the entitlement, rounded down.
#[must_use]
pub const fn max_abono_days(entitled_days: u16) -> u16 {
    entitled_days / 3
}
