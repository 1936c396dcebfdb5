//! Runs RuboCop out of process and exposes its findings as queryable,
//! per-line results.
//!
//! The host editor supplies the resolved invocation ([`RunnerConfig`]) and a
//! working directory; [`task::run`] spawns the tool, drains both output
//! streams concurrently, and streams the JSON report into a
//! [`rucop_types::RunReport`]. An [`AnalysisSession`] merges completed runs
//! into one project-wide [`ResultStore`] and notifies a subscriber;
//! [`annotate`] maps a single offense onto a clamped character range for
//! rendering.

pub mod annotate;
pub mod config;
pub mod parser;
pub mod store;
pub mod task;

mod error;
mod session;

pub use config::RunnerConfig;
pub use error::{ParseError, RunError};
pub use session::{AnalysisSession, SessionEvent};
pub use store::ResultStore;
