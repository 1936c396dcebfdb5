//! Failure taxonomy for one analyzer run.
//!
//! Only failures that prevent a report from being produced are error values.
//! Anomalous-but-survivable conditions (non-{0,1} exit code, a failed wait)
//! are logged by the task and never discard an already-parsed report.

use std::path::PathBuf;

use thiserror::Error;

/// The report could not be decoded.
#[derive(Debug, Error)]
#[error("malformed analyzer report: {0}")]
pub struct ParseError(#[from] pub(crate) serde_json::Error);

/// A run failed before producing a report.
#[derive(Debug, Error)]
pub enum RunError {
    /// The tool process could not be started. Carries the resolved working
    /// directory since a wrong root is the usual culprit.
    #[error("failed to launch analyzer in {}: {source}", workdir.display())]
    LaunchFailed {
        workdir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child's stdout/stderr pipes could not be taken after spawn.
    #[error("failed to capture analyzer output streams")]
    StreamCapture,

    /// The report could not be decoded. Both captured streams are carried
    /// verbatim so the host can show them instead of a bare stack trace.
    #[error("failed to parse analyzer output: {source}")]
    ParseFailed {
        #[source]
        source: ParseError,
        stdout: String,
        stderr: String,
    },
}

impl RunError {
    /// Actionable checklist shown alongside a parse failure.
    #[must_use]
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::ParseFailed { .. } => &[
                "you installed RuboCop for this Ruby version",
                "you did run `bundle install` successfully (if you use Bundler)",
                "your RuboCop version isn't ancient",
            ],
            Self::LaunchFailed { .. } | Self::StreamCapture => &[],
        }
    }

    /// Raw captured output, present on parse failures.
    #[must_use]
    pub fn captured_output(&self) -> Option<(&str, &str)> {
        match self {
            Self::ParseFailed { stdout, stderr, .. } => Some((stdout, stderr)),
            Self::LaunchFailed { .. } | Self::StreamCapture => None,
        }
    }
}
