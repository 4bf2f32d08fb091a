mod common;

use anyhow::Result;
use common::{covered, day, parse, random_period, strings, Lcg};
use period_algebra::{Boundaries, Period, PeriodCollection, Precision};
use std::collections::BTreeSet;

fn january() -> PeriodCollection {
    PeriodCollection::new(vec![
        day("2018-01-01", "2018-01-05"),
        day("2018-01-10", "2018-01-15"),
        day("2018-01-20", "2018-01-25"),
        day("2018-01-30", "2018-01-31"),
    ])
}

#[test]
fn test_gaps_of_a_collection() -> Result<()> {
    let gaps = january().gaps()?;

    assert_eq!(
        strings(&gaps),
        vec![
            "[2018-01-06,2018-01-09]",
            "[2018-01-16,2018-01-19]",
            "[2018-01-26,2018-01-29]",
        ]
    );
    Ok(())
}

#[test]
fn test_boundaries_of_a_collection() -> Result<()> {
    let envelope = january().boundaries().expect("collection is not empty");
    assert!(envelope.equals(&day("2018-01-01", "2018-01-31"))?);
    assert_eq!(envelope.boundaries(), Boundaries::EXCLUDE_NONE);
    Ok(())
}

#[test]
fn test_no_gaps_when_members_coincide() -> Result<()> {
    let member = Period::make(
        "2018-01-01",
        "2018-01-05",
        Precision::Day,
        Boundaries::EXCLUDE_END,
    )?;
    let collection = PeriodCollection::new(vec![member.clone(), member.clone(), member]);

    assert!(collection.gaps()?.is_empty());
    Ok(())
}

#[test]
fn test_overlap_with_a_single_collection() -> Result<()> {
    let a = PeriodCollection::new(vec![
        day("2018-01-05", "2018-01-10"),
        day("2018-01-20", "2018-01-25"),
    ]);
    let b = PeriodCollection::new(vec![
        day("2018-01-01", "2018-01-15"),
        day("2018-01-22", "2018-01-30"),
    ]);

    let overlaps = a.overlap_all([&b])?;

    assert_eq!(overlaps.len(), 2);
    assert!(overlaps[0].equals(&day("2018-01-05", "2018-01-10"))?);
    assert!(overlaps[1].equals(&day("2018-01-22", "2018-01-25"))?);
    Ok(())
}

#[test]
fn test_overlap_with_multiple_collections() -> Result<()> {
    let a = PeriodCollection::new(vec![
        day("2018-01-01", "2018-01-07"),
        day("2018-01-15", "2018-01-25"),
    ]);
    let b = PeriodCollection::from(day("2018-01-01", "2018-01-20"));
    let c = PeriodCollection::from(day("2018-01-06", "2018-01-25"));

    let overlaps = a.overlap_all([&b, &c])?;

    assert_eq!(overlaps.len(), 2);
    assert!(overlaps[0].equals(&day("2018-01-06", "2018-01-07"))?);
    assert!(overlaps[1].equals(&day("2018-01-15", "2018-01-20"))?);
    Ok(())
}

#[test]
fn test_intersect() -> Result<()> {
    let collection = PeriodCollection::new(vec![
        day("2019-01-05", "2019-01-15"),
        day("2019-01-01", "2019-01-10"),
        day("2019-01-10", "2019-01-15"),
        day("2019-02-01", "2019-02-15"),
    ]);

    let intersect = collection.intersect(&day("2019-01-09", "2019-01-11"))?;

    assert_eq!(
        strings(&intersect),
        vec![
            "[2019-01-09,2019-01-11]",
            "[2019-01-09,2019-01-10]",
            "[2019-01-10,2019-01-11]",
        ]
    );
    Ok(())
}

#[test]
fn test_subtract_period_from_collection() -> Result<()> {
    let collection = PeriodCollection::new(vec![
        day("1987-02-01", "1987-02-10"),
        day("1987-02-11", "1987-02-28"),
    ]);

    let result = collection.subtract(&day("1987-02-20", "1987-02-21"))?;

    assert_eq!(
        strings(&result),
        vec![
            "[1987-02-01,1987-02-10]",
            "[1987-02-11,1987-02-19]",
            "[1987-02-22,1987-02-28]",
        ]
    );
    Ok(())
}

#[test]
fn test_subtract_collection_from_collection() -> Result<()> {
    let collection = PeriodCollection::new(vec![
        day("1987-02-01", "1987-02-10"),
        day("1987-02-11", "1987-02-28"),
    ]);
    let removed = PeriodCollection::new(vec![
        day("1987-02-05", "1987-02-06"),
        day("1987-02-20", "1987-02-21"),
    ]);

    let result = collection.subtract(&removed)?;

    assert_eq!(
        strings(&result),
        vec![
            "[1987-02-01,1987-02-04]",
            "[1987-02-07,1987-02-10]",
            "[1987-02-11,1987-02-19]",
            "[1987-02-22,1987-02-28]",
        ]
    );
    Ok(())
}

#[test]
fn test_subtract_empty_collection() -> Result<()> {
    let collection = january();
    let result = collection.subtract(&PeriodCollection::empty())?;
    assert_eq!(result, collection);
    Ok(())
}

#[test]
fn test_unique_drops_duplicates() {
    let mut periods = vec![day("2018-01-01", "2018-01-02"); 5];
    periods.push(day("2018-01-30", "2018-01-31"));
    let collection = PeriodCollection::new(periods);

    let unique = collection.unique();

    assert_eq!(collection.len(), 6);
    assert_eq!(unique.len(), 2);
    assert_eq!(unique[0], collection[0]);
    assert_eq!(unique[1], collection[5]);
}

#[test]
fn test_map_filter_reduce() {
    let collection = PeriodCollection::new(vec![
        day("2019-01-01", "2019-01-02"),
        day("2019-02-01", "2019-02-02"),
    ]);

    let mapped = collection.map(|period| period.clone());
    assert_eq!(mapped, collection);

    let filtered = collection.filter(|period| period.start() < common::at("2019-01-15 00:00:00"));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0], collection[0]);

    let total = collection.reduce(0, |total, period| total + period.length());
    assert_eq!(total, 4);

    let renewed: PeriodCollection = collection.iter().map(Period::renew).collect();
    assert_eq!(
        strings(&renewed),
        vec!["[2019-01-03,2019-01-04]", "[2019-02-03,2019-02-04]"]
    );
}

#[test]
fn test_union_merges_overlapping_and_touching_members() -> Result<()> {
    let collection = PeriodCollection::new(vec![
        day("2018-01-10", "2018-01-15"),
        day("2018-01-01", "2018-01-05"),
        day("2018-01-04", "2018-01-08"),
        parse("(2018-01-15,2018-01-20]"),
        day("2018-01-25", "2018-01-31"),
    ]);

    assert_eq!(
        strings(&collection.union()?),
        vec![
            "[2018-01-01,2018-01-08]",
            "[2018-01-10,2018-01-20]",
            "[2018-01-25,2018-01-31]",
        ]
    );
    Ok(())
}

#[test]
fn test_union_without_holes_is_the_envelope() -> Result<()> {
    let collection = PeriodCollection::new(vec![
        day("2018-01-01", "2018-01-10"),
        day("2018-01-05", "2018-01-20"),
    ]);

    assert_eq!(strings(&collection.union()?), vec!["[2018-01-01,2018-01-20]"]);
    Ok(())
}

#[test]
fn test_unique_intervals() -> Result<()> {
    let collection = PeriodCollection::new(vec![
        day("2018-01-01", "2018-01-31"),
        day("2018-01-10", "2018-01-15"),
        day("2018-02-10", "2018-02-15"),
    ]);

    assert_eq!(
        strings(&collection.unique_intervals()?),
        vec![
            "[2018-01-01,2018-01-09]",
            "[2018-01-10,2018-01-15]",
            "[2018-01-16,2018-01-31]",
            "[2018-02-10,2018-02-15]",
        ]
    );
    Ok(())
}

#[test]
fn test_sort_is_stable() {
    let collection = PeriodCollection::new(vec![
        day("2018-01-10", "2018-01-12"),
        day("2018-01-01", "2018-01-31"),
        day("2018-01-01", "2018-01-02"),
    ]);

    assert_eq!(
        strings(&collection.sort()),
        vec![
            "[2018-01-01,2018-01-31]",
            "[2018-01-01,2018-01-02]",
            "[2018-01-10,2018-01-12]",
        ]
    );
}

#[test]
fn test_round_trips_through_json() -> Result<()> {
    let collection = january();
    let json = serde_json::to_string(&collection)?;
    let back: PeriodCollection = serde_json::from_str(&json)?;
    assert_eq!(back, collection);
    Ok(())
}

/// Sampled collections: union, gaps and unique intervals agree with the
/// instants the members cover
#[test]
fn test_bulk_operations_match_coverage() -> Result<()> {
    let mut rng = Lcg::new(2024);

    for _ in 0..60 {
        let size = 1 + rng.below(6) as usize;
        let collection: PeriodCollection = (0..size)
            .map(|_| random_period(&mut rng, Precision::Day, 40))
            .collect();
        let members = covered(&collection);

        let union = collection.union()?;
        assert_eq!(covered(&union), members);
        for pair in union.as_slice().windows(2) {
            assert!(!pair[0].overlaps_with(&pair[1])? && !pair[0].touches_with(&pair[1])?);
        }

        let envelope = collection.boundaries().expect("collection is not empty");
        let gaps = covered(&collection.gaps()?);
        let expected: BTreeSet<_> = envelope
            .iter()
            .filter(|instant| !members.contains(instant))
            .collect();
        assert_eq!(gaps, expected);

        let pieces = collection.unique_intervals_with_members()?;
        let mut seen = BTreeSet::new();
        for (piece, cover) in &pieces {
            for instant in piece.iter() {
                assert!(seen.insert(instant));
                let expected_cover: Vec<usize> = collection
                    .iter()
                    .enumerate()
                    .filter(|(_, member)| member.contains(&instant))
                    .map(|(index, _)| index)
                    .collect();
                assert_eq!(&expected_cover, cover);
            }
        }
        assert_eq!(seen, members);

        for pair in pieces.windows(2) {
            let (left, left_cover) = &pair[0];
            let (right, right_cover) = &pair[1];
            assert!(left_cover != right_cover || !left.touches_with(right)?);
        }
    }
    Ok(())
}
