//! Core domain types for rucop.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. The runner crate builds these from the analyzer's streamed
//! report; everything here is immutable once constructed.

mod file_result;
mod offense;
mod report;
mod severity;

pub use file_result::FileResult;
pub use offense::{DEFAULT_COP, DEFAULT_MESSAGE, Offense, OffenseLocation};
pub use report::RunReport;
pub use severity::Severity;
