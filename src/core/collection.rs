use crate::core::period::Period;
use crate::domain::Boundaries;
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Index;

/// An ordered list of periods. Duplicates are allowed and nothing keeps the
/// members sorted; every operation returns a new collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodCollection {
    periods: Vec<Period>,
}

impl PeriodCollection {
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Period> {
        self.periods.get(index)
    }

    pub fn first(&self) -> Option<&Period> {
        self.periods.first()
    }

    pub fn last(&self) -> Option<&Period> {
        self.periods.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Period> {
        self.periods.iter()
    }

    pub fn as_slice(&self) -> &[Period] {
        &self.periods
    }

    pub fn into_vec(self) -> Vec<Period> {
        self.periods
    }

    pub fn add<I: IntoIterator<Item = Period>>(&self, periods: I) -> Self {
        let mut combined = self.periods.clone();
        combined.extend(periods);
        Self::new(combined)
    }

    pub fn map<F: FnMut(&Period) -> Period>(&self, f: F) -> Self {
        self.periods.iter().map(f).collect()
    }

    pub fn filter<F: FnMut(&Period) -> bool>(&self, mut f: F) -> Self {
        self.periods.iter().filter(|period| f(period)).cloned().collect()
    }

    pub fn reduce<T, F: FnMut(T, &Period) -> T>(&self, initial: T, f: F) -> T {
        self.periods.iter().fold(initial, f)
    }

    /// Parts covered by this collection and by every one of `others`.
    pub fn overlap_all<'a, I>(&self, others: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a PeriodCollection>,
    {
        let mut overlap = self.clone();

        for other in others {
            overlap = overlap.overlap_with(other)?;
        }

        Ok(overlap)
    }

    fn overlap_with(&self, other: &PeriodCollection) -> Result<Self> {
        let mut overlaps = Vec::new();

        for period in &self.periods {
            for other_period in &other.periods {
                if let Some(overlap) = period.overlap(other_period)? {
                    overlaps.push(overlap);
                }
            }
        }

        Ok(Self::new(overlaps))
    }

    /// One closed period from the earliest included start to the latest
    /// included end, at the first member's precision. `None` when the
    /// collection covers nothing.
    pub fn boundaries(&self) -> Option<Period> {
        let precision = self.first()?.precision();
        let start = self.periods.iter().map(Period::included_start).min()?;
        let end = self.periods.iter().map(Period::included_end).max()?;

        if start > end {
            return None;
        }

        Period::new(start, end, precision, Boundaries::EXCLUDE_NONE).ok()
    }

    /// Stretches inside the envelope not covered by any member.
    pub fn gaps(&self) -> Result<Self> {
        let Some(envelope) = self.boundaries() else {
            return Ok(Self::empty());
        };

        tracing::debug!(members = self.len(), envelope = %envelope, "computing gaps");
        envelope.subtract_all(&self.periods)
    }

    /// Overlap of `period` with every member, empty results dropped.
    pub fn intersect(&self, period: &Period) -> Result<Self> {
        let mut intersected = Vec::new();

        for member in &self.periods {
            if let Some(overlap) = period.overlap(member)? {
                intersected.push(overlap);
            }
        }

        Ok(Self::new(intersected))
    }

    /// Removes `other` (a period or a whole collection) from every member.
    pub fn subtract<S: AsRef<[Period]> + ?Sized>(&self, other: &S) -> Result<Self> {
        let others = other.as_ref();
        if others.is_empty() {
            return Ok(self.clone());
        }

        let mut remaining = Vec::new();
        for member in &self.periods {
            remaining.extend(member.subtract_all(others)?);
        }

        Ok(Self::new(remaining))
    }

    /// Drops members whose canonical string was already seen.
    pub fn unique(&self) -> Self {
        let mut seen = HashSet::new();
        self.filter(|period| seen.insert(period.as_string()))
    }

    /// Sorted by included start. Members starting together keep their order.
    pub fn sort(&self) -> Self {
        let mut sorted = self.periods.clone();
        sorted.sort_by_key(Period::included_start);
        Self::new(sorted)
    }

    /// Merges overlapping and touching members into maximal periods.
    pub fn union(&self) -> Result<Self> {
        let Some(envelope) = self.boundaries() else {
            return Ok(Self::empty());
        };

        tracing::debug!(members = self.len(), "merging collection");
        let holes = envelope.subtract_all(&self.periods)?;
        Self::from(envelope).subtract(&holes)
    }

    /// Finest partition of the covered time into pieces that are each
    /// covered by one fixed set of members.
    pub fn unique_intervals(&self) -> Result<Self> {
        Ok(self
            .unique_intervals_with_members()?
            .into_iter()
            .map(|(piece, _)| piece)
            .collect())
    }

    /// Like [`PeriodCollection::unique_intervals`], pairing every piece with
    /// the indices of the members covering it.
    pub fn unique_intervals_with_members(&self) -> Result<Vec<(Period, Vec<usize>)>> {
        let Some(first) = self.first() else {
            return Ok(Vec::new());
        };

        for member in &self.periods {
            first.ensure_precision_matches(member)?;
        }

        let precision = first.precision();
        let covered: Vec<&Period> = self
            .periods
            .iter()
            .filter(|period| period.has_included_range())
            .collect();

        // a piece can only begin where a member begins or right after one ends
        let mut cuts: Vec<NaiveDateTime> = covered
            .iter()
            .flat_map(|period| {
                [
                    period.included_start(),
                    precision.increment(period.included_end()),
                ]
            })
            .collect();
        cuts.sort();
        cuts.dedup();

        tracing::debug!(
            members = self.len(),
            cuts = cuts.len(),
            "partitioning into unique intervals"
        );

        let mut pieces = Vec::new();
        for window in cuts.windows(2) {
            let (from, until) = (window[0], window[1]);

            let members: Vec<usize> = self
                .periods
                .iter()
                .enumerate()
                .filter(|(_, period)| {
                    period.has_included_range()
                        && period.included_start() <= from
                        && from <= period.included_end()
                })
                .map(|(index, _)| index)
                .collect();

            if members.is_empty() {
                continue;
            }

            let piece = Period::new(
                from,
                precision.decrement(until),
                precision,
                Boundaries::EXCLUDE_NONE,
            )?;
            pieces.push((piece, members));
        }

        Ok(pieces)
    }
}

impl Index<usize> for PeriodCollection {
    type Output = Period;

    fn index(&self, index: usize) -> &Period {
        &self.periods[index]
    }
}

impl AsRef<[Period]> for PeriodCollection {
    fn as_ref(&self) -> &[Period] {
        &self.periods
    }
}

impl From<Vec<Period>> for PeriodCollection {
    fn from(periods: Vec<Period>) -> Self {
        Self::new(periods)
    }
}

impl From<Period> for PeriodCollection {
    fn from(period: Period) -> Self {
        Self::new(vec![period])
    }
}

impl FromIterator<Period> for PeriodCollection {
    fn from_iter<I: IntoIterator<Item = Period>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Period> for PeriodCollection {
    fn extend<I: IntoIterator<Item = Period>>(&mut self, iter: I) {
        self.periods.extend(iter);
    }
}

impl IntoIterator for PeriodCollection {
    type Item = Period;
    type IntoIter = std::vec::IntoIter<Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.into_iter()
    }
}

impl<'a> IntoIterator for &'a PeriodCollection {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}
