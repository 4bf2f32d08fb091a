//! Calendar-field distance between two instants.
//!
//! Unlike a plain `TimeDelta`, a span keeps years and months as calendar
//! units: January 1st to February 1st is one month, not 31 days. Borrowing
//! a month while computing the day field uses the length of the earlier
//! instant's month.

use crate::domain::precision::days_in_month;
use chrono::{Datelike, Months, NaiveDateTime, TimeDelta, Timelike};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CalendarSpan {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// Whole days elapsed, independent of the calendar fields.
    pub total_days: i64,
}

impl CalendarSpan {
    /// Absolute span between two instants; argument order does not matter.
    pub fn between(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        let (earlier, later) = if a <= b { (a, b) } else { (b, a) };

        let mut years = i64::from(later.year()) - i64::from(earlier.year());
        let mut months = i64::from(later.month()) - i64::from(earlier.month());
        let mut days = i64::from(later.day()) - i64::from(earlier.day());
        let mut hours = i64::from(later.hour()) - i64::from(earlier.hour());
        let mut minutes = i64::from(later.minute()) - i64::from(earlier.minute());
        let mut seconds = i64::from(later.second()) - i64::from(earlier.second());

        if seconds < 0 {
            seconds += 60;
            minutes -= 1;
        }
        if minutes < 0 {
            minutes += 60;
            hours -= 1;
        }
        if hours < 0 {
            hours += 24;
            days -= 1;
        }
        if days < 0 {
            days += i64::from(days_in_month(earlier.year(), earlier.month()));
            months -= 1;
        }
        if months < 0 {
            months += 12;
            years -= 1;
        }

        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            total_days: (later - earlier).num_days(),
        }
    }

    /// True when every calendar field is zero, i.e. both instants are the
    /// same point in time.
    pub fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
    }

    /// Adds the span to `anchor`: calendar months first, then the fixed
    /// units. Saturates at the representable range.
    pub fn add_to(&self, anchor: NaiveDateTime) -> NaiveDateTime {
        let months = u32::try_from(self.years * 12 + self.months).unwrap_or(u32::MAX);
        let fixed = self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds;

        anchor
            .checked_add_months(Months::new(months))
            .and_then(|moved| {
                TimeDelta::try_seconds(fixed).and_then(|delta| moved.checked_add_signed(delta))
            })
            .unwrap_or(NaiveDateTime::MAX)
    }
}
