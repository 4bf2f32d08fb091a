#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use period_algebra::{Boundaries, Period, PeriodCollection, Precision};
use std::collections::BTreeSet;

pub const ALL_BOUNDARIES: [Boundaries; 4] = [
    Boundaries::EXCLUDE_NONE,
    Boundaries::EXCLUDE_START,
    Boundaries::EXCLUDE_END,
    Boundaries::EXCLUDE_ALL,
];

/// Small linear congruential generator so sampled cases are reproducible.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    pub fn boundaries(&mut self) -> Boundaries {
        ALL_BOUNDARIES[self.below(4) as usize]
    }
}

pub fn base_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn parse(text: &str) -> Period {
    Period::from_string(text).unwrap()
}

pub fn day(start: &str, end: &str) -> Period {
    Period::make(start, end, Precision::Day, Boundaries::EXCLUDE_NONE).unwrap()
}

pub fn strings(collection: &PeriodCollection) -> Vec<String> {
    collection.iter().map(Period::as_string).collect()
}

/// A period spanning at least two units, so even `()` keeps one instant.
pub fn random_period(rng: &mut Lcg, precision: Precision, max_units: u64) -> Period {
    let offset = rng.below(max_units) as i64;
    let units = 2 + rng.below(max_units) as i64;

    let start = precision.add_units(base_instant(), offset);
    let end = precision.add_units(start, units);

    Period::new(start, end, precision, rng.boundaries()).unwrap()
}

pub fn instants(period: &Period) -> BTreeSet<NaiveDateTime> {
    period.iter().collect()
}

pub fn covered(collection: &PeriodCollection) -> BTreeSet<NaiveDateTime> {
    collection.iter().flat_map(Period::iter).collect()
}
