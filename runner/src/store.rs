//! Project-wide result store — the merged view across repeated partial runs.

use std::collections::HashMap;
use std::sync::Arc;

use rucop_types::{FileResult, RunReport};

/// Most recent [`FileResult`] per tool-relative path, merged across runs.
///
/// This is an explicit value, not ambient state: callers hold the current
/// store and thread it through [`ResultStore::merge`], which returns a new
/// store. File results are `Arc`-shared, so a merge copies map entries, never
/// offense data.
///
/// A path mapping to a result with zero offenses means "analyzed, clean" and
/// is distinct from an absent path ("never analyzed") - empty entries are
/// deliberately kept.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    files: HashMap<String, Arc<FileResult>>,
}

impl ResultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last-write-wins merge: every file the incoming run touched replaces
    /// (or inserts) its entry; untouched entries carry over unchanged.
    /// Merging the same report twice is a no-op after the first application.
    #[must_use]
    pub fn merge(&self, incoming: &RunReport) -> Self {
        let mut files = self.files.clone();
        for file_result in incoming.file_results() {
            files.insert(file_result.path().to_string(), Arc::clone(file_result));
        }
        Self { files }
    }

    /// Most recent result for `path`, if any run analyzed it.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Arc<FileResult>> {
        self.files.get(path)
    }

    /// Number of files with a known result.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total offenses across all files, for status displays.
    #[must_use]
    pub fn offense_count(&self) -> usize {
        self.files.values().map(|fr| fr.offenses().len()).sum()
    }
}
