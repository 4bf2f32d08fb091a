use crate::core::collection::PeriodCollection;
use crate::core::period::Period;
use crate::domain::{Boundaries, CalendarSpan};
use crate::utils::error::Result;

impl Period {
    /// Common part of both periods, keeping this period's boundaries.
    pub fn overlap(&self, other: &Period) -> Result<Option<Period>> {
        self.ensure_precision_matches(other)?;

        let start = self.included_start().max(other.included_start());
        let end = self.included_end().min(other.included_end());

        if start > end {
            return Ok(None);
        }

        Period::make_with_boundaries(start, end, self.precision(), self.boundaries()).map(Some)
    }

    /// Part shared by this period and every one of `others`, `None` as soon
    /// as one step comes up empty or when `others` is empty.
    pub fn overlap_all(&self, others: &[Period]) -> Result<Option<Period>> {
        let Some((first, rest)) = others.split_first() else {
            return Ok(None);
        };

        let Some(mut current) = self.overlap(first)? else {
            return Ok(None);
        };

        for other in rest {
            match current.overlap(other)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }

        Ok(Some(current))
    }

    /// Every non-empty overlap of this period with one of `others`, in
    /// argument order.
    pub fn overlap_any(&self, others: &[Period]) -> Result<PeriodCollection> {
        let mut overlaps = Vec::new();

        for other in others {
            if let Some(overlap) = self.overlap(other)? {
                overlaps.push(overlap);
            }
        }

        Ok(PeriodCollection::new(overlaps))
    }

    /// The period strictly between two periods that neither overlap nor
    /// touch. Argument order does not matter.
    pub fn gap(&self, other: &Period) -> Result<Option<Period>> {
        if self.overlaps_with(other)? || self.touches_with(other)? {
            return Ok(None);
        }

        let (earlier, later) = if self.included_start() >= other.included_end() {
            (other, self)
        } else {
            (self, other)
        };

        let precision = self.precision();
        Period::new(
            precision.increment(earlier.included_end()),
            precision.decrement(later.included_start()),
            precision,
            Boundaries::default(),
        )
        .map(Some)
    }

    /// This period minus `other`: nothing, one or two fragments, each with
    /// this period's boundaries.
    pub fn subtract(&self, other: &Period) -> Result<PeriodCollection> {
        if !self.overlaps_with(other)? {
            return Ok(PeriodCollection::from(self.clone()));
        }

        let precision = self.precision();
        let mut fragments = Vec::with_capacity(2);

        if self.included_start() < other.included_start() {
            fragments.push(Period::make_with_boundaries(
                self.included_start(),
                precision.decrement(other.included_start()),
                precision,
                self.boundaries(),
            )?);
        }

        if self.included_end() > other.included_end() {
            fragments.push(Period::make_with_boundaries(
                precision.increment(other.included_end()),
                self.included_end(),
                precision,
                self.boundaries(),
            )?);
        }

        Ok(PeriodCollection::new(fragments))
    }

    /// This period minus every one of `others`.
    pub fn subtract_all(&self, others: &[Period]) -> Result<PeriodCollection> {
        let own = PeriodCollection::from(self.clone());
        if others.is_empty() {
            return Ok(own);
        }

        let remainders = others
            .iter()
            .map(|other| self.subtract(other))
            .collect::<Result<Vec<_>>>()?;

        own.overlap_all(&remainders)
    }

    /// Parts covered by exactly one of the two periods.
    pub fn diff_symmetric(&self, other: &Period) -> Result<PeriodCollection> {
        let both = PeriodCollection::new(vec![self.clone(), other.clone()]);

        let Some(overlap) = self.overlap(other)? else {
            return Ok(both);
        };

        match both.boundaries() {
            Some(envelope) => envelope.subtract(&overlap),
            None => Ok(both),
        }
    }

    /// The following period of the same length, starting one unit after
    /// this one's included end.
    pub fn renew(&self) -> Period {
        if !self.has_included_range() {
            let end = CalendarSpan::between(self.start(), self.end()).add_to(self.end());
            return Period::from_bounds(self.end(), end, self.precision(), self.boundaries());
        }

        let span = CalendarSpan::between(self.included_start(), self.included_end());
        let start = self.precision().increment(self.included_end());

        Period::from_included(start, span.add_to(start), self.precision(), self.boundaries())
    }
}
