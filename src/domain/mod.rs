// Domain layer: the value types every period operation is built from.
// No dependencies beyond chrono/serde and the crate error type.

pub mod boundaries;
pub mod precision;
pub mod span;

pub use boundaries::Boundaries;
pub use precision::{CalendarStep, Precision};
pub use span::CalendarSpan;
