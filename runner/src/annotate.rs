//! Maps one offense onto a display class and a clamped character range.
//!
//! The document may have been edited since the run that produced the offense,
//! so every offset the report gave us is treated as a hint: the line is
//! clamped into the document, and the computed range into the document's
//! span. Ranges are half-open.

use std::ops::Range;

use rucop_types::{Offense, Severity};

/// What the mapper needs to know about the host's text buffer. Line numbers
/// here are 0-based; `line_end_offset` excludes the line terminator.
pub trait DocumentLayout {
    fn line_count(&self) -> u32;
    fn line_start_offset(&self, line: u32) -> usize;
    fn line_end_offset(&self, line: u32) -> usize;
}

/// Display class the host renders an offense with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightClass {
    Error,
    Warning,
    WeakWarning,
    Info,
}

/// Fixed severity → display class table.
#[must_use]
pub fn highlight_class(severity: Severity) -> HighlightClass {
    match severity {
        Severity::Error | Severity::Fatal => HighlightClass::Error,
        Severity::Warning => HighlightClass::Warning,
        Severity::Convention => HighlightClass::WeakWarning,
        Severity::Refactor | Severity::Info | Severity::Unknown => HighlightClass::Info,
    }
}

/// Character range for `offense` within `document`.
///
/// The report's 1-based line is converted to 0-based and clamped to the
/// document; a zero `length` (or an explicit `whole_line` request) yields the
/// full line. Otherwise the range starts at the 1-based column within the
/// line and spans `length` characters, clamped so it can never point past
/// the end of the buffer.
pub fn range_for(
    offense: &Offense,
    document: &impl DocumentLayout,
    whole_line: bool,
) -> Range<usize> {
    let line_count = document.line_count();
    if line_count == 0 {
        return 0..0;
    }

    let location = offense.location();
    let target_line = location.line().saturating_sub(1).min(line_count - 1);
    let line_start = document.line_start_offset(target_line);
    let line_end = document.line_end_offset(target_line);

    let length = location.length() as usize;
    if whole_line || length == 0 {
        return line_start..line_end;
    }

    let document_end = document.line_end_offset(line_count - 1);
    let column = location.column().saturating_sub(1) as usize;
    let start = line_start.saturating_add(column).min(document_end);
    let end = start.saturating_add(length).min(document_end);
    start..end
}

/// Display text: the rule message trimmed, suffixed with the cop name.
#[must_use]
pub fn display_message(offense: &Offense) -> String {
    format!("{} ({})", offense.message().trim(), offense.cop())
}
