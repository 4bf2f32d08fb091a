use crate::domain::precision::Precision;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeriodError {
    #[error("The end time `{end}` is before the start time `{start}`.")]
    InvalidPeriod { start: String, end: String },

    #[error("Could not construct a date from `{value}`{}", format_suffix(.format))]
    InvalidDate {
        value: String,
        format: Option<String>,
    },

    #[error("Cannot compare two periods whose precision doesn't match ({left} vs {right}).")]
    CannotComparePeriods { left: Precision, right: Precision },

    #[error(
        "Cannot get the latest {} of a {}.",
        .period.unit_name(),
        .requested.unit_name()
    )]
    CannotCeilLowerPrecision {
        period: Precision,
        requested: Precision,
    },

    #[error("Invalid boundary notation: `{notation}`")]
    InvalidBoundaries { notation: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value `{value}` for `{field}`: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

fn format_suffix(format: &Option<String>) -> String {
    match format {
        Some(format) => format!(" with format `{}`", format),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed dates, periods or notation supplied by the caller.
    Input,
    /// Valid values combined in an unsupported way.
    Usage,
    Config,
}

impl PeriodError {
    pub fn invalid_date(value: impl Into<String>, format: Option<&str>) -> Self {
        PeriodError::InvalidDate {
            value: value.into(),
            format: format.map(str::to_string),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PeriodError::InvalidPeriod { .. }
            | PeriodError::InvalidDate { .. }
            | PeriodError::InvalidBoundaries { .. } => ErrorCategory::Input,
            PeriodError::CannotComparePeriods { .. }
            | PeriodError::CannotCeilLowerPrecision { .. } => ErrorCategory::Usage,
            PeriodError::IoError(_)
            | PeriodError::ConfigError { .. }
            | PeriodError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PeriodError::InvalidPeriod { .. } => "Swap the bounds so the start comes first",
            PeriodError::InvalidDate { .. } => {
                "Write periods as [2021-01-01,2021-02-01) or pass a matching --format"
            }
            PeriodError::InvalidBoundaries { .. } => "Use [ or ( to open and ] or ) to close",
            PeriodError::CannotComparePeriods { .. } => {
                "Write every period with the same number of date components"
            }
            PeriodError::CannotCeilLowerPrecision { .. } => {
                "Ask for a precision no finer than the period's own"
            }
            PeriodError::IoError(_) => "Check that the config file exists and is readable",
            PeriodError::ConfigError { .. } | PeriodError::InvalidConfigValueError { .. } => {
                "Fix the reported field in the config file"
            }
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Usage => 3,
            ErrorCategory::Config => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, PeriodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_message_names_both_units() {
        let err = PeriodError::CannotCeilLowerPrecision {
            period: Precision::Hour,
            requested: Precision::Second,
        };
        assert_eq!(err.to_string(), "Cannot get the latest hour of a second.");
        assert_eq!(err.category(), ErrorCategory::Usage);
    }

    #[test]
    fn test_invalid_date_message() {
        let err = PeriodError::invalid_date("2018-13-45", Some("%Y-%m-%d"));
        assert_eq!(
            err.to_string(),
            "Could not construct a date from `2018-13-45` with format `%Y-%m-%d`"
        );

        let err = PeriodError::invalid_date("nope", None);
        assert_eq!(err.to_string(), "Could not construct a date from `nope`");
    }
}
