// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;
use time::Date;

/// Source of national holiday dates consulted by the start-date rule.
pub trait HolidayCalendar {
    /// Returns true if `date` is a national holiday.
    fn is_national_holiday(&self, date: Date) -> bool;
}

/// A fixed set of national holiday dates.
///
/// An empty set is the degraded calendar used when no provider answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NationalHolidays {
    dates: BTreeSet<Date>,
}

impl NationalHolidays {
    /// Creates an empty holiday set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            dates: BTreeSet::new(),
        }
    }

    /// Returns true if no holidays are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of known holidays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Iterates the holidays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Date> {
        self.dates.iter()
    }
}

impl FromIterator<Date> for NationalHolidays {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for NationalHolidays {
    fn is_national_holiday(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }
}
