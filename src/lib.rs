//! Interval algebra over date/time periods.
//!
//! A [`Period`] is a span between two instants with a [`Precision`] and
//! [`Boundaries`] that say whether each end is part of it. Periods and
//! [`PeriodCollection`]s support overlap, gap, subtraction, union and
//! partitioning, all computed on the included bounds.

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::PeriodConfig;

pub use self::core::{
    Containable, DateInput, Period, PeriodCollection, PeriodDuration, PeriodFactory, PeriodIter,
};
pub use domain::{Boundaries, CalendarSpan, CalendarStep, Precision};
pub use utils::error::{ErrorCategory, PeriodError, Result};
