use crate::domain::{Boundaries, Precision};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "period-algebra")]
#[command(about = "Set operations on date/time periods")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML file with factory defaults")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Periods are written in interval notation, e.g. `[2021-01-01,2021-02-01)`.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build a period from two dates using the configured defaults
    Make {
        start: String,
        end: String,
        #[arg(long)]
        precision: Option<Precision>,
        #[arg(long)]
        boundaries: Option<Boundaries>,
    },
    /// Number of precision units in a period
    Length { period: String },
    /// Part shared by all given periods
    Overlap {
        #[arg(required = true, num_args = 2..)]
        periods: Vec<String>,
    },
    /// Period strictly between two periods
    Gap { first: String, second: String },
    /// First period minus all the others
    Subtract {
        period: String,
        #[arg(required = true)]
        others: Vec<String>,
    },
    /// Parts covered by exactly one of two periods
    Diff { first: String, second: String },
    /// Whether two periods are adjacent
    Touches { first: String, second: String },
    /// Whether a period contains a date or another period
    Contains { period: String, item: String },
    /// Merge overlapping and adjacent periods
    Union {
        #[arg(required = true)]
        periods: Vec<String>,
    },
    /// Uncovered stretches between the given periods
    Gaps {
        #[arg(required = true)]
        periods: Vec<String>,
    },
    /// Split periods into pieces each covered by a fixed set of inputs
    UniqueIntervals {
        #[arg(required = true)]
        periods: Vec<String>,
    },
    /// Order periods by start
    Sort {
        #[arg(required = true)]
        periods: Vec<String>,
    },
    /// Envelope around all given periods
    Boundaries {
        #[arg(required = true)]
        periods: Vec<String>,
    },
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", &path.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overlap_command() {
        let cli = CliConfig::try_parse_from([
            "period-algebra",
            "--json",
            "overlap",
            "[2021-01-01,2021-02-01)",
            "[2021-01-10,2021-01-15]",
        ])
        .unwrap();

        assert!(cli.json);
        assert!(matches!(cli.command, Command::Overlap { ref periods } if periods.len() == 2));
    }

    #[test]
    fn test_parse_make_options() {
        let cli = CliConfig::try_parse_from([
            "period-algebra",
            "make",
            "2021-01-01",
            "2021-03-01",
            "--precision",
            "month",
            "--boundaries",
            "[)",
        ])
        .unwrap();

        match cli.command {
            Command::Make {
                precision,
                boundaries,
                ..
            } => {
                assert_eq!(precision, Some(Precision::Month));
                assert_eq!(boundaries, Some(Boundaries::EXCLUDE_END));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_overlap_needs_two_periods() {
        assert!(
            CliConfig::try_parse_from(["period-algebra", "overlap", "[2021-01-01,2021-02-01)"])
                .is_err()
        );
    }
}
