use crate::domain::precision::Precision;
use crate::utils::error::{PeriodError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which ends of a period are excluded.
///
/// Written in interval notation: `[` and `]` include a bound, `(` and `)`
/// exclude it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Boundaries {
    start_excluded: bool,
    end_excluded: bool,
}

impl Boundaries {
    pub const EXCLUDE_NONE: Boundaries = Boundaries::new(false, false);
    pub const EXCLUDE_START: Boundaries = Boundaries::new(true, false);
    pub const EXCLUDE_END: Boundaries = Boundaries::new(false, true);
    pub const EXCLUDE_ALL: Boundaries = Boundaries::new(true, true);

    pub const fn new(start_excluded: bool, end_excluded: bool) -> Self {
        Self {
            start_excluded,
            end_excluded,
        }
    }

    pub fn from_notation(open: char, close: char) -> Result<Self> {
        let start_excluded = match open {
            '[' => false,
            '(' => true,
            _ => return Err(invalid_notation(open, close)),
        };
        let end_excluded = match close {
            ']' => false,
            ')' => true,
            _ => return Err(invalid_notation(open, close)),
        };

        Ok(Self::new(start_excluded, end_excluded))
    }

    pub fn start_excluded(&self) -> bool {
        self.start_excluded
    }

    pub fn start_included(&self) -> bool {
        !self.start_excluded
    }

    pub fn end_excluded(&self) -> bool {
        self.end_excluded
    }

    pub fn end_included(&self) -> bool {
        !self.end_excluded
    }

    pub fn opening_char(&self) -> char {
        if self.start_excluded {
            '('
        } else {
            '['
        }
    }

    pub fn closing_char(&self) -> char {
        if self.end_excluded {
            ')'
        } else {
            ']'
        }
    }

    /// Raw start a period needs so that `included_start` is its first
    /// included instant.
    pub fn real_start(&self, included_start: NaiveDateTime, precision: Precision) -> NaiveDateTime {
        if self.start_excluded {
            precision.decrement(included_start)
        } else {
            precision.round(included_start)
        }
    }

    /// Raw end a period needs so that `included_end` is its last included
    /// instant.
    pub fn real_end(&self, included_end: NaiveDateTime, precision: Precision) -> NaiveDateTime {
        if self.end_excluded {
            precision.increment(included_end)
        } else {
            precision.round(included_end)
        }
    }
}

fn invalid_notation(open: char, close: char) -> PeriodError {
    PeriodError::InvalidBoundaries {
        notation: format!("{}{}", open, close),
    }
}

impl fmt::Display for Boundaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.opening_char(), self.closing_char())
    }
}

impl FromStr for Boundaries {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(open), Some(close), None) => Boundaries::from_notation(open, close),
            _ => Err(PeriodError::InvalidBoundaries {
                notation: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Boundaries {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Boundaries> for String {
    fn from(value: Boundaries) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_from_notation() {
        assert_eq!(
            Boundaries::from_notation('[', ']').unwrap(),
            Boundaries::EXCLUDE_NONE
        );
        assert_eq!(
            Boundaries::from_notation('(', ']').unwrap(),
            Boundaries::EXCLUDE_START
        );
        assert_eq!(
            Boundaries::from_notation('[', ')').unwrap(),
            Boundaries::EXCLUDE_END
        );
        assert_eq!(
            Boundaries::from_notation('(', ')').unwrap(),
            Boundaries::EXCLUDE_ALL
        );
        assert!(matches!(
            Boundaries::from_notation('{', ']'),
            Err(PeriodError::InvalidBoundaries { .. })
        ));
        assert!(Boundaries::from_notation('[', '>').is_err());
    }

    #[test]
    fn test_string_form() {
        assert_eq!(Boundaries::EXCLUDE_END.to_string(), "[)");
        assert_eq!("(]".parse::<Boundaries>().unwrap(), Boundaries::EXCLUDE_START);
        assert!("[".parse::<Boundaries>().is_err());
        assert!("[]]".parse::<Boundaries>().is_err());
    }

    #[test]
    fn test_real_bounds_step_outward_on_excluded_sides() {
        let day = NaiveDate::from_ymd_opt(2021, 1, 20)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let excluded = Boundaries::EXCLUDE_ALL;
        assert_eq!(
            excluded.real_start(day, Precision::Day).to_string(),
            "2021-01-19 00:00:00"
        );
        assert_eq!(
            excluded.real_end(day, Precision::Day).to_string(),
            "2021-01-21 00:00:00"
        );

        let included = Boundaries::EXCLUDE_NONE;
        assert_eq!(included.real_start(day, Precision::Day), day);
        assert_eq!(included.real_end(day, Precision::Day), day);
    }
}
