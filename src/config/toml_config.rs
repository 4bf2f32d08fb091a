use crate::core::PeriodFactory;
use crate::domain::{Boundaries, Precision};
use crate::utils::error::{PeriodError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    pub logging: Option<LoggingConfig>,
}

/// Settings applied by [`PeriodFactory::from_config`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub precision: Precision,
    #[serde(default)]
    pub boundaries: Boundaries,
    /// chrono format for string inputs
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `period_algebra=debug`
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl PeriodConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config file");
        Self::from_toml_str(&content)
    }

    /// Parses TOML after replacing `${VAR}` with environment values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| PeriodError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let name = &caps[1];
                std::env::var(name).unwrap_or_else(|_| format!("${{{}}}", name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(format) = &self.defaults.format {
            validation::validate_date_format("defaults.format", format)?;
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validation::validate_log_directive("logging.level", level)?;
        }

        Ok(())
    }

    pub fn precision(&self) -> Precision {
        self.defaults.precision
    }

    pub fn boundaries(&self) -> Boundaries {
        self.defaults.boundaries
    }

    pub fn format(&self) -> Option<&str> {
        self.defaults.format.as_deref()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn factory(&self) -> PeriodFactory {
        PeriodFactory::from_config(self)
    }
}

impl Validate for PeriodConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
