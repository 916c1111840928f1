pub mod aggregate;
pub mod error;
pub mod fetch;
pub mod process;
pub mod types;

pub use aggregate::{build_dashboard, Dashboard};
pub use error::LoadError;
pub use fetch::{load, load_from, try_load_from};
pub use types::{Dataset, GroupCount, LoadOutcome, Metrics, Row, YearCount};
