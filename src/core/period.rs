use crate::core::duration::PeriodDuration;
use crate::core::factory::{DateInput, PeriodFactory};
use crate::domain::{Boundaries, CalendarStep, Precision};
use crate::utils::error::{PeriodError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

const INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A contiguous span of time at a given precision.
///
/// `start` and `end` are the bounds as written, rounded to the precision.
/// `included_start` and `included_end` are the first and last instants that
/// actually belong to the period: an excluded side is moved one unit inward.
/// Every comparison and set operation works on the included bounds.
///
/// `==` compares all fields. Use [`Period::equals`] to compare the covered
/// range only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    start: NaiveDateTime,
    end: NaiveDateTime,
    included_start: NaiveDateTime,
    included_end: NaiveDateTime,
    precision: Precision,
    boundaries: Boundaries,
}

impl Period {
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        precision: Precision,
        boundaries: Boundaries,
    ) -> Result<Self> {
        if start > end {
            return Err(PeriodError::InvalidPeriod {
                start: start.format(INSTANT_FORMAT).to_string(),
                end: end.format(INSTANT_FORMAT).to_string(),
            });
        }

        Ok(Self::from_bounds(start, end, precision, boundaries))
    }

    /// Assembles a period from bounds that are already in order.
    pub(crate) fn from_bounds(
        start: NaiveDateTime,
        end: NaiveDateTime,
        precision: Precision,
        boundaries: Boundaries,
    ) -> Self {
        let start = precision.round(start);
        let end = precision.round(end);

        let included_start = if boundaries.start_included() {
            start
        } else {
            precision.increment(start)
        };
        let included_end = if boundaries.end_included() {
            end
        } else {
            precision.decrement(end)
        };

        Self {
            start,
            end,
            included_start,
            included_end,
            precision,
            boundaries,
        }
    }

    /// Builds a period from instants or strings. Strings containing a space
    /// are read as `%Y-%m-%d %H:%M:%S`, others as `%Y-%m-%d` at midnight.
    pub fn make<'a, 'b>(
        start: impl Into<DateInput<'a>>,
        end: impl Into<DateInput<'b>>,
        precision: Precision,
        boundaries: Boundaries,
    ) -> Result<Self> {
        PeriodFactory::build(start.into(), end.into(), precision, boundaries, None)
    }

    /// Like [`Period::make`] but string inputs are parsed with `format`.
    pub fn make_with_format<'a, 'b>(
        start: impl Into<DateInput<'a>>,
        end: impl Into<DateInput<'b>>,
        precision: Precision,
        boundaries: Boundaries,
        format: &str,
    ) -> Result<Self> {
        PeriodFactory::build(start.into(), end.into(), precision, boundaries, Some(format))
    }

    /// Builds a period whose *included* bounds are the given instants.
    pub fn make_with_boundaries(
        included_start: NaiveDateTime,
        included_end: NaiveDateTime,
        precision: Precision,
        boundaries: Boundaries,
    ) -> Result<Self> {
        PeriodFactory::make_with_boundaries(included_start, included_end, precision, boundaries)
    }

    /// Parses the canonical notation, e.g. `[2021-01-01,2021-02-01)`.
    pub fn from_string(text: &str) -> Result<Self> {
        PeriodFactory::from_string(text)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn included_start(&self) -> NaiveDateTime {
        self.included_start
    }

    pub fn included_end(&self) -> NaiveDateTime {
        self.included_end
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn boundaries(&self) -> Boundaries {
        self.boundaries
    }

    /// One precision unit.
    pub fn interval(&self) -> CalendarStep {
        self.precision.unit_step()
    }

    pub fn is_start_included(&self) -> bool {
        self.boundaries.start_included()
    }

    pub fn is_start_excluded(&self) -> bool {
        self.boundaries.start_excluded()
    }

    pub fn is_end_included(&self) -> bool {
        self.boundaries.end_included()
    }

    pub fn is_end_excluded(&self) -> bool {
        self.boundaries.end_excluded()
    }

    /// False for degenerate periods such as `[2021-01-01,2021-01-01)` that
    /// contain no instant at all.
    pub fn has_included_range(&self) -> bool {
        self.included_start <= self.included_end
    }

    pub fn duration(&self) -> PeriodDuration<'_> {
        PeriodDuration::new(self)
    }

    /// Last instant of the included end at `precision` (the period's own
    /// precision when `None`), e.g. `2018-01-31 23:59:59` for a month.
    ///
    /// Asking for a finer precision than the period keeps fails, since that
    /// detail was discarded when the period was rounded.
    pub fn ceiling_end(&self, precision: Option<Precision>) -> Result<NaiveDateTime> {
        let target = precision.unwrap_or(self.precision);

        if target.higher_than(self.precision) {
            return Err(PeriodError::CannotCeilLowerPrecision {
                period: self.precision,
                requested: target,
            });
        }

        Ok(self.precision.ceil(self.included_end, target))
    }

    /// Number of precision units covered, both included ends counted.
    pub fn length(&self) -> u64 {
        if !self.has_included_range() {
            return 0;
        }

        match self.precision {
            // Months and years vary in length, only counting works.
            Precision::Year | Precision::Month => self.iter().count() as u64,
            Precision::Day => {
                let days = (self.included_end.date() - self.included_start.date()).num_days();
                days.unsigned_abs() + 1
            }
            Precision::Hour | Precision::Minute | Precision::Second => {
                let seconds = (self.included_end - self.included_start).num_seconds();
                let unit = match self.precision.unit_step() {
                    CalendarStep::Seconds(unit) => unit,
                    CalendarStep::Months(_) => 1,
                };
                (seconds / unit).unsigned_abs() + 1
            }
        }
    }

    pub fn iter(&self) -> PeriodIter {
        PeriodIter {
            next: self.has_included_range().then_some(self.included_start),
            last: self.included_end,
            precision: self.precision,
        }
    }

    pub fn as_string(&self) -> String {
        let format = self.precision.date_format();
        format!(
            "{}{},{}{}",
            self.boundaries.opening_char(),
            self.start.format(format),
            self.end.format(format),
            self.boundaries.closing_char()
        )
    }

    /// Assembles a period straight from its included bounds, which must
    /// already be in order.
    pub(crate) fn from_included(
        included_start: NaiveDateTime,
        included_end: NaiveDateTime,
        precision: Precision,
        boundaries: Boundaries,
    ) -> Self {
        let included_start = precision.round(included_start);
        let included_end = precision.round(included_end);

        Self {
            start: boundaries.real_start(included_start, precision),
            end: boundaries.real_end(included_end, precision),
            included_start,
            included_end,
            precision,
            boundaries,
        }
    }

    pub(crate) fn ensure_precision_matches(&self, other: &Period) -> Result<()> {
        if self.precision == other.precision {
            return Ok(());
        }

        Err(PeriodError::CannotComparePeriods {
            left: self.precision,
            right: other.precision,
        })
    }
}

/// Every included instant of a period, one precision unit apart.
#[derive(Debug, Clone)]
pub struct PeriodIter {
    next: Option<NaiveDateTime>,
    last: NaiveDateTime,
    precision: Precision,
}

impl Iterator for PeriodIter {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|current| *current <= self.last)?;
        let following = self.precision.increment(current);
        // increment saturates at the end of the representable range
        self.next = (following > current).then_some(following);
        Some(current)
    }
}

impl FusedIterator for PeriodIter {}

impl<'a> IntoIterator for &'a Period {
    type Item = NaiveDateTime;
    type IntoIter = PeriodIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl AsRef<[Period]> for Period {
    fn as_ref(&self) -> &[Period] {
        std::slice::from_ref(self)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        Period::from_string(s)
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self> {
        Period::from_string(&value)
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.as_string()
    }
}
