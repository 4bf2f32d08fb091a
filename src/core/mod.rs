pub mod collection;
pub mod comparisons;
pub mod duration;
pub mod factory;
pub mod operations;
pub mod period;

pub use collection::PeriodCollection;
pub use comparisons::Containable;
pub use duration::PeriodDuration;
pub use factory::{DateInput, PeriodFactory};
pub use period::{Period, PeriodIter};
pub use crate::utils::error::Result;
