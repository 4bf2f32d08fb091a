use crate::config::PeriodConfig;
use crate::core::period::Period;
use crate::domain::precision::{assemble, parse_components};
use crate::domain::{Boundaries, Precision};
use crate::utils::error::{PeriodError, Result};
use chrono::format::{self, ParseResult, Parsed, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// chrono specifiers that carry a time of day.
const TIME_SPECIFIERS: [&str; 12] = [
    "%H", "%k", "%I", "%l", "%M", "%S", "%T", "%R", "%r", "%X", "%c", "%s",
];

static NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([\[(])\s*([\d\-:\s]+?)\s*,+\s*([\d\-:\s]+?)\s*([\])])\s*$")
        .expect("notation pattern is valid")
});

/// A bound handed to the factory: an instant, or text still to be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    Instant(NaiveDateTime),
    Text(&'a str),
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::Instant(value)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(value: NaiveDate) -> Self {
        DateInput::Instant(value.and_time(NaiveTime::MIN))
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        DateInput::Text(value)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(value: &'a String) -> Self {
        DateInput::Text(value.as_str())
    }
}

/// Builds periods with a fixed set of defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodFactory {
    precision: Precision,
    boundaries: Boundaries,
    format: Option<String>,
}

impl PeriodFactory {
    pub fn new(precision: Precision, boundaries: Boundaries) -> Self {
        Self {
            precision,
            boundaries,
            format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn from_config(config: &PeriodConfig) -> Self {
        let defaults = &config.defaults;
        Self {
            precision: defaults.precision,
            boundaries: defaults.boundaries,
            format: defaults.format.clone(),
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn boundaries(&self) -> Boundaries {
        self.boundaries
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Builds a period with this factory's precision, boundaries and format.
    pub fn make<'a, 'b>(
        &self,
        start: impl Into<DateInput<'a>>,
        end: impl Into<DateInput<'b>>,
    ) -> Result<Period> {
        Self::build(
            start.into(),
            end.into(),
            self.precision,
            self.boundaries,
            self.format(),
        )
    }

    /// Like [`PeriodFactory::make`] with explicit precision and boundaries.
    pub fn make_with<'a, 'b>(
        &self,
        start: impl Into<DateInput<'a>>,
        end: impl Into<DateInput<'b>>,
        precision: Precision,
        boundaries: Boundaries,
    ) -> Result<Period> {
        Self::build(start.into(), end.into(), precision, boundaries, self.format())
    }

    pub fn build(
        start: DateInput<'_>,
        end: DateInput<'_>,
        precision: Precision,
        boundaries: Boundaries,
        format: Option<&str>,
    ) -> Result<Period> {
        let start = precision.round(Self::resolve_date(start, format)?);
        let end = precision.round(Self::resolve_date(end, format)?);

        Period::new(start, end, precision, boundaries)
    }

    /// Derives raw bounds from the included ones: a side that is excluded
    /// moves one unit outward.
    pub fn make_with_boundaries(
        included_start: NaiveDateTime,
        included_end: NaiveDateTime,
        precision: Precision,
        boundaries: Boundaries,
    ) -> Result<Period> {
        let start = boundaries.real_start(included_start, precision);
        let end = boundaries.real_end(included_end, precision);

        Period::new(start, end, precision, boundaries)
    }

    /// Parses `<open><start>,<end><close>`. The precision follows from the
    /// number of components in the start token; the end token has to match.
    pub fn from_string(text: &str) -> Result<Period> {
        let captures = NOTATION
            .captures(text)
            .ok_or_else(|| PeriodError::invalid_date(text, None))?;

        let bracket = |index: usize| {
            captures
                .get(index)
                .and_then(|found| found.as_str().chars().next())
                .unwrap_or_default()
        };
        let boundaries = Boundaries::from_notation(bracket(1), bracket(4))?;

        let start_token = captures.get(2).map_or("", |found| found.as_str());
        let end_token = captures.get(3).map_or("", |found| found.as_str());

        let (precision, start) = parse_token(start_token)?;
        let (end_precision, end) = parse_token(end_token)?;

        if end_precision != precision {
            return Err(PeriodError::invalid_date(
                end_token.trim(),
                Some(precision.date_format()),
            ));
        }

        tracing::trace!(%precision, %boundaries, "parsed period notation");
        Period::new(start, end, precision, boundaries)
    }

    /// Turns a [`DateInput`] into an instant. Without a format, text with a
    /// space is read as date and time, anything else as a date at midnight.
    pub fn resolve_date(input: DateInput<'_>, format: Option<&str>) -> Result<NaiveDateTime> {
        let text = match input {
            DateInput::Instant(instant) => return Ok(instant),
            DateInput::Text(text) => text.trim(),
        };

        let format = format.unwrap_or(if text.contains(' ') {
            DATE_TIME_FORMAT
        } else {
            DATE_FORMAT
        });

        let parsed = if has_time_fields(format) {
            parse_date_time(text, format)
        } else {
            NaiveDate::parse_from_str(text, format).map(|date| date.and_time(NaiveTime::MIN))
        };

        parsed.map_err(|_| PeriodError::invalid_date(text, Some(format)))
    }
}

fn has_time_fields(format: &str) -> bool {
    TIME_SPECIFIERS
        .iter()
        .any(|specifier| format.contains(specifier))
}

/// Like `NaiveDateTime::parse_from_str`, but a format that stops at the hour
/// (e.g. `%Y-%m-%d %H`) reads the minute as zero.
fn parse_date_time(text: &str, pattern: &str) -> ParseResult<NaiveDateTime> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(pattern))?;

    if parsed.hour_div_12().is_some() && parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }

    parsed.to_naive_datetime_with_offset(0)
}

fn parse_token(token: &str) -> Result<(Precision, NaiveDateTime)> {
    let invalid = || PeriodError::invalid_date(token.trim(), None);
    let (precision, [year, month, day, hour, minute, second]) =
        parse_components(token).ok_or_else(invalid)?;
    let year = i32::try_from(year).map_err(|_| invalid())?;
    let instant = assemble(year, month, day, hour, minute, second).ok_or_else(invalid)?;

    Ok((precision, instant))
}
