use crate::severity::Severity;

/// Message substituted when the report omits one.
pub const DEFAULT_MESSAGE: &str = "(no message)";

/// Cop name substituted when the report omits one.
pub const DEFAULT_COP: &str = "Style/UnknownCop";

/// Where an offense sits in its file.
///
/// `line` and `column` are 1-based, as RuboCop reports them. The zero value
/// means "unknown location" and must be clamped before being used as a line
/// index. A `length` of 0 means "apply to the whole line" at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffenseLocation {
    line: u32,
    column: u32,
    length: u32,
}

impl OffenseLocation {
    #[must_use]
    pub fn new(line: u32, column: u32, length: u32) -> Self {
        Self {
            line,
            column,
            length,
        }
    }

    /// The "unknown location" sentinel.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// 1-based line number; 0 means unknown.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column number; 0 means unknown.
    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Span length in characters; 0 means whole line.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }
}

/// A single diagnostic reported by the analyzer.
///
/// Fields are private; construction happens once, in the parser, and the
/// value is never mutated afterwards. Missing report fields take the
/// documented defaults instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offense {
    severity: Severity,
    cop: String,
    message: String,
    location: OffenseLocation,
}

impl Offense {
    #[must_use]
    pub fn new(
        severity: Severity,
        cop: String,
        message: String,
        location: OffenseLocation,
    ) -> Self {
        Self {
            severity,
            cop,
            message,
            location,
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Identifier of the violated rule (e.g. "Style/StringLiterals").
    #[must_use]
    pub fn cop(&self) -> &str {
        &self.cop
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn location(&self) -> &OffenseLocation {
        &self.location
    }
}
