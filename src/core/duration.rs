use crate::core::period::Period;
use crate::domain::CalendarSpan;
use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// Size of a period, detached from where it sits on the calendar.
///
/// Spans are compared by adding them to the same reference instant
/// (1970-01-01 00:00:00), so one month counts as one month even when the
/// periods fall in months of different lengths.
#[derive(Debug, Clone, Copy)]
pub struct PeriodDuration<'a> {
    period: &'a Period,
}

impl<'a> PeriodDuration<'a> {
    pub fn new(period: &'a Period) -> Self {
        Self { period }
    }

    pub fn period(&self) -> &'a Period {
        self.period
    }

    /// Calendar-field distance between the included bounds.
    pub fn span(&self) -> CalendarSpan {
        CalendarSpan::between(self.period.included_start(), self.period.included_end())
    }

    pub fn compare_to(&self, other: &PeriodDuration<'_>) -> Ordering {
        // NaiveDateTime::default() is the unix epoch
        let reference = NaiveDateTime::default();
        self.span()
            .add_to(reference)
            .cmp(&other.span().add_to(reference))
    }

    pub fn equals(&self, other: &PeriodDuration<'_>) -> bool {
        let (a, b) = (self.period, other.period);

        if a.start() == b.start() && a.end() == b.end() {
            return true;
        }

        if a.included_start() == b.included_start() && a.included_end() == b.included_end() {
            return true;
        }

        if self.span().total_days == other.span().total_days {
            return true;
        }

        self.compare_to(other) == Ordering::Equal
    }

    pub fn is_larger_than(&self, other: &PeriodDuration<'_>) -> bool {
        self.compare_to(other) == Ordering::Greater
    }

    pub fn is_smaller_than(&self, other: &PeriodDuration<'_>) -> bool {
        self.compare_to(other) == Ordering::Less
    }
}
