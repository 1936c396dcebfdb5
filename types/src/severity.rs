use serde::{Deserialize, Serialize};

/// Severity of an offense as reported by RuboCop.
///
/// The report is an external, versioned format; anything we don't recognize
/// (including an absent field) maps to [`Severity::Unknown`] rather than
/// failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Refactor,
    Convention,
    Warning,
    Error,
    Fatal,
    Unknown,
}

impl Severity {
    /// Lenient construction from the report's severity string.
    #[must_use]
    pub fn from_report(value: &str) -> Self {
        match value {
            "info" => Self::Info,
            "refactor" => Self::Refactor,
            "convention" => Self::Convention,
            "warning" => Self::Warning,
            "error" => Self::Error,
            "fatal" => Self::Fatal,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error | Self::Fatal)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Refactor => "refactor",
            Self::Convention => "convention",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Unknown
    }
}
