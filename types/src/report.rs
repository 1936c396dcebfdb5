use std::sync::Arc;

use crate::file_result::FileResult;

/// Everything one analyzer invocation produced: per-file results in the
/// order the tool emitted them, plus warnings captured from its stderr.
///
/// File results are `Arc`-shared so merging a report into the project-wide
/// store never copies offense data.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    file_results: Vec<Arc<FileResult>>,
    warnings: Vec<String>,
}

impl RunReport {
    #[must_use]
    pub fn new(file_results: Vec<Arc<FileResult>>, warnings: Vec<String>) -> Self {
        Self {
            file_results,
            warnings,
        }
    }

    #[must_use]
    pub fn file_results(&self) -> &[Arc<FileResult>] {
        &self.file_results
    }

    /// Diagnostic warnings the tool printed on its side channel.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// First file result matching `path`, if the run analyzed it.
    #[must_use]
    pub fn file_result(&self, path: &str) -> Option<&Arc<FileResult>> {
        self.file_results.iter().find(|fr| fr.path() == path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.file_results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file_results.is_empty()
    }
}
