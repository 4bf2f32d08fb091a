use crate::utils::error::{PeriodError, Result};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Date/time components of a token, each group only present when the
/// coarser one before it is.
static COMPONENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})(?:\s*-\s*(\d{1,2})(?:\s*-\s*(\d{1,2})(?:\s+(\d{1,2})(?:\s*:\s*(\d{1,2})(?:\s*:\s*(\d{1,2}))?)?)?)?)?$",
    )
    .expect("component pattern is valid")
});

/// Granularity of a period. Variants are ordered from the coarsest to the
/// finest, so `Precision::Year < Precision::Second`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Year,
    Month,
    #[default]
    Day,
    Hour,
    Minute,
    Second,
}

/// The size of one precision unit.
///
/// Years and months have no fixed length, so they step on the calendar;
/// the remaining units are a fixed number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarStep {
    Months(u32),
    Seconds(i64),
}

impl CalendarStep {
    /// Moves `date` by `count` steps, saturating at the representable range.
    pub fn apply(self, date: NaiveDateTime, count: i64) -> NaiveDateTime {
        let moved = match self {
            CalendarStep::Months(months) => i64::from(months)
                .checked_mul(count)
                .and_then(|total| u32::try_from(total.unsigned_abs()).ok().map(|abs| (total, abs)))
                .and_then(|(total, abs)| {
                    if total >= 0 {
                        date.checked_add_months(Months::new(abs))
                    } else {
                        date.checked_sub_months(Months::new(abs))
                    }
                }),
            CalendarStep::Seconds(seconds) => seconds
                .checked_mul(count)
                .and_then(TimeDelta::try_seconds)
                .and_then(|delta| date.checked_add_signed(delta)),
        };

        moved.unwrap_or(if count >= 0 {
            NaiveDateTime::MAX
        } else {
            NaiveDateTime::MIN
        })
    }
}

impl fmt::Display for CalendarStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CalendarStep::Months(months) if months % 12 == 0 => write!(f, "P{}Y", months / 12),
            CalendarStep::Months(months) => write!(f, "P{}M", months),
            CalendarStep::Seconds(seconds) if seconds % 86_400 == 0 => {
                write!(f, "P{}D", seconds / 86_400)
            }
            CalendarStep::Seconds(seconds) if seconds % 3_600 == 0 => {
                write!(f, "PT{}H", seconds / 3_600)
            }
            CalendarStep::Seconds(seconds) if seconds % 60 == 0 => {
                write!(f, "PT{}M", seconds / 60)
            }
            CalendarStep::Seconds(seconds) => write!(f, "PT{}S", seconds),
        }
    }
}

impl Precision {
    pub const ALL: [Precision; 6] = [
        Precision::Year,
        Precision::Month,
        Precision::Day,
        Precision::Hour,
        Precision::Minute,
        Precision::Second,
    ];

    /// Infers the precision from how many date/time components a token
    /// carries, e.g. `2021-01` is a month and `2021-01-01 10:00` a minute.
    pub fn from_string(token: &str) -> Result<Precision> {
        parse_components(token)
            .map(|(precision, _)| precision)
            .ok_or_else(|| PeriodError::invalid_date(token, None))
    }

    pub fn unit_name(self) -> &'static str {
        match self {
            Precision::Year => "year",
            Precision::Month => "month",
            Precision::Day => "day",
            Precision::Hour => "hour",
            Precision::Minute => "minute",
            Precision::Second => "second",
        }
    }

    /// chrono format used for the canonical string of a period.
    pub fn date_format(self) -> &'static str {
        match self {
            Precision::Year => "%Y",
            Precision::Month => "%Y-%m",
            Precision::Day => "%Y-%m-%d",
            Precision::Hour => "%Y-%m-%d %H",
            Precision::Minute => "%Y-%m-%d %H:%M",
            Precision::Second => "%Y-%m-%d %H:%M:%S",
        }
    }

    pub fn unit_step(self) -> CalendarStep {
        match self {
            Precision::Year => CalendarStep::Months(12),
            Precision::Month => CalendarStep::Months(1),
            Precision::Day => CalendarStep::Seconds(86_400),
            Precision::Hour => CalendarStep::Seconds(3_600),
            Precision::Minute => CalendarStep::Seconds(60),
            Precision::Second => CalendarStep::Seconds(1),
        }
    }

    /// True when `self` keeps more detail than `other`.
    pub fn higher_than(self, other: Precision) -> bool {
        self > other
    }

    /// Zeroes every field finer than this precision.
    pub fn round(self, date: NaiveDateTime) -> NaiveDateTime {
        let month = if self >= Precision::Month { date.month() } else { 1 };
        let day = if self >= Precision::Day { date.day() } else { 1 };
        let hour = if self >= Precision::Hour { date.hour() } else { 0 };
        let minute = if self >= Precision::Minute { date.minute() } else { 0 };
        let second = if self >= Precision::Second { date.second() } else { 0 };

        assemble(date.year(), month, day, hour, minute, second).unwrap_or(date)
    }

    /// Sets every field finer than `target` to its maximum, e.g. the last
    /// day of the month and 23:59:59 for a month ceiling.
    pub fn ceil(self, date: NaiveDateTime, target: Precision) -> NaiveDateTime {
        let date = self.round(date);
        let year = date.year();
        let month = if target >= Precision::Month { date.month() } else { 12 };
        let day = if target >= Precision::Day {
            date.day()
        } else {
            days_in_month(year, month)
        };
        let hour = if target >= Precision::Hour { date.hour() } else { 23 };
        let minute = if target >= Precision::Minute { date.minute() } else { 59 };
        let second = if target >= Precision::Second { date.second() } else { 59 };

        assemble(year, month, day, hour, minute, second).unwrap_or(date)
    }

    pub fn increment(self, date: NaiveDateTime) -> NaiveDateTime {
        self.add_units(date, 1)
    }

    pub fn decrement(self, date: NaiveDateTime) -> NaiveDateTime {
        self.add_units(date, -1)
    }

    /// Moves `date` by `count` units (negative goes back) and rounds the
    /// result, so variable month and year lengths cannot leave drift.
    pub fn add_units(self, date: NaiveDateTime, count: i64) -> NaiveDateTime {
        self.round(self.unit_step().apply(self.round(date), count))
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit_name())
    }
}

impl FromStr for Precision {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Precision::ALL
            .into_iter()
            .find(|precision| precision.unit_name() == name)
            .ok_or_else(|| PeriodError::InvalidConfigValueError {
                field: "precision".to_string(),
                value: s.to_string(),
                reason: "expected one of year, month, day, hour, minute, second".to_string(),
            })
    }
}

/// Splits a token into its precision and `[year, month, day, hour, minute,
/// second]`, missing fields defaulting to their minimum.
pub(crate) fn parse_components(token: &str) -> Option<(Precision, [u32; 6])> {
    let captures = COMPONENTS.captures(token.trim())?;
    let mut fields = [0, 1, 1, 0, 0, 0];
    let mut present = 0;

    for (index, field) in fields.iter_mut().enumerate() {
        match captures.get(index + 1) {
            Some(value) => {
                *field = value.as_str().parse().ok()?;
                present += 1;
            }
            None => break,
        }
    }

    let precision = Precision::ALL[present - 1];
    Some((precision, fields))
}

pub(crate) fn assemble(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}
