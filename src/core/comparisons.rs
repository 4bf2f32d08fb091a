use crate::core::period::Period;
use crate::domain::CalendarSpan;
use crate::utils::error::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Anything a period can contain: a single instant or another period.
pub trait Containable {
    fn is_contained_in(&self, period: &Period) -> bool;
}

impl Containable for NaiveDateTime {
    fn is_contained_in(&self, period: &Period) -> bool {
        let date = period.precision().round(*self);
        period.included_start() <= date && date <= period.included_end()
    }
}

impl Containable for NaiveDate {
    fn is_contained_in(&self, period: &Period) -> bool {
        self.and_time(NaiveTime::MIN).is_contained_in(period)
    }
}

impl Containable for Period {
    fn is_contained_in(&self, period: &Period) -> bool {
        period.included_start() <= self.included_start()
            && self.included_end() <= period.included_end()
    }
}

impl Period {
    fn rounded(&self, date: NaiveDateTime) -> NaiveDateTime {
        self.precision().round(date)
    }

    pub fn starts_before(&self, date: NaiveDateTime) -> bool {
        self.included_start() < self.rounded(date)
    }

    pub fn starts_before_or_at(&self, date: NaiveDateTime) -> bool {
        self.included_start() <= self.rounded(date)
    }

    pub fn starts_after(&self, date: NaiveDateTime) -> bool {
        self.included_start() > self.rounded(date)
    }

    pub fn starts_after_or_at(&self, date: NaiveDateTime) -> bool {
        self.included_start() >= self.rounded(date)
    }

    pub fn starts_at(&self, date: NaiveDateTime) -> bool {
        self.included_start() == self.rounded(date)
    }

    pub fn ends_before(&self, date: NaiveDateTime) -> bool {
        self.included_end() < self.rounded(date)
    }

    pub fn ends_before_or_at(&self, date: NaiveDateTime) -> bool {
        self.included_end() <= self.rounded(date)
    }

    pub fn ends_after(&self, date: NaiveDateTime) -> bool {
        self.included_end() > self.rounded(date)
    }

    pub fn ends_after_or_at(&self, date: NaiveDateTime) -> bool {
        self.included_end() >= self.rounded(date)
    }

    pub fn ends_at(&self, date: NaiveDateTime) -> bool {
        self.included_end() == self.rounded(date)
    }

    /// Instants are rounded to the period's precision first. A period is
    /// contained when its whole included range lies inside this one.
    pub fn contains<C: Containable + ?Sized>(&self, item: &C) -> bool {
        item.is_contained_in(self)
    }

    pub fn overlaps_with(&self, other: &Period) -> Result<bool> {
        self.ensure_precision_matches(other)?;

        Ok(self.included_start() <= other.included_end()
            && other.included_start() <= self.included_end())
    }

    /// True when the periods do not overlap and no unit lies between them.
    pub fn touches_with(&self, other: &Period) -> Result<bool> {
        if self.overlaps_with(other)? {
            return Ok(false);
        }

        let (nearer, farther) = if self.included_end() < other.included_start() {
            (self.included_end(), other.included_start())
        } else {
            (other.included_end(), self.included_start())
        };

        let next = self.precision().increment(nearer);
        Ok(CalendarSpan::between(next, farther).is_zero())
    }

    /// Same included range. Raw bounds and boundaries may differ.
    pub fn equals(&self, other: &Period) -> Result<bool> {
        self.ensure_precision_matches(other)?;

        Ok(self.included_start() == other.included_start()
            && self.included_end() == other.included_end())
    }
}
