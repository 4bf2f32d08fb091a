use crate::utils::error::{PeriodError, Result};
use chrono::format::{Item, StrftimeItems};
use tracing_subscriber::EnvFilter;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PeriodError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PeriodError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PeriodError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rejects chrono format strings with unknown specifiers.
pub fn validate_date_format(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(PeriodError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Unknown or incomplete format specifier".to_string(),
        });
    }
    Ok(())
}

pub fn validate_log_directive(field_name: &str, directive: &str) -> Result<()> {
    validate_non_empty_string(field_name, directive)?;

    EnvFilter::try_new(directive)
        .map(|_| ())
        .map_err(|e| PeriodError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: directive.to_string(),
            reason: format!("Invalid log filter: {}", e),
        })
}
