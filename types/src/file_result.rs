use std::collections::HashMap;

use crate::offense::Offense;

/// All offenses reported for one file, in report order, with a per-line
/// index for O(1) lookup.
///
/// The index is built eagerly at construction - the value is immutable, so
/// there is nothing to invalidate. It is a materialized view over `offenses`:
/// every indexed offense is in `offenses` and vice versa, by construction.
#[derive(Debug)]
pub struct FileResult {
    path: String,
    offenses: Vec<Offense>,
    by_line: HashMap<u32, Vec<usize>>,
}

impl FileResult {
    #[must_use]
    pub fn new(path: String, offenses: Vec<Offense>) -> Self {
        let mut by_line: HashMap<u32, Vec<usize>> = HashMap::new();
        for (index, offense) in offenses.iter().enumerate() {
            by_line
                .entry(offense.location().line())
                .or_default()
                .push(index);
        }
        Self {
            path,
            offenses,
            by_line,
        }
    }

    /// Path as the tool emitted it, relative to the analyzed root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All offenses, in report order.
    #[must_use]
    pub fn offenses(&self) -> &[Offense] {
        &self.offenses
    }

    /// Offenses whose location sits on `line` (1-based), in report order.
    /// Lines with no offenses yield an empty iterator.
    pub fn offenses_at(&self, line: u32) -> impl Iterator<Item = &Offense> {
        self.by_line
            .get(&line)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&index| &self.offenses[index])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offenses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offense::OffenseLocation;
    use crate::severity::Severity;

    fn make_offense(cop: &str, line: u32) -> Offense {
        Offense::new(
            Severity::Warning,
            cop.to_string(),
            "msg".to_string(),
            OffenseLocation::new(line, 1, 3),
        )
    }

    #[test]
    fn test_empty_file_result() {
        let result = FileResult::new("Gemfile".to_string(), vec![]);
        assert_eq!(result.path(), "Gemfile");
        assert!(result.is_empty());
        assert_eq!(result.offenses_at(1).count(), 0);
    }

    #[test]
    fn test_offenses_at_returns_only_matching_lines() {
        let result = FileResult::new(
            "test.rb".to_string(),
            vec![
                make_offense("Style/A", 5),
                make_offense("Style/B", 11),
                make_offense("Style/C", 5),
            ],
        );

        let at_five: Vec<&str> = result.offenses_at(5).map(Offense::cop).collect();
        assert_eq!(at_five, vec!["Style/A", "Style/C"]);

        let at_eleven: Vec<&str> = result.offenses_at(11).map(Offense::cop).collect();
        assert_eq!(at_eleven, vec!["Style/B"]);

        assert_eq!(result.offenses_at(6).count(), 0);
    }

    #[test]
    fn test_index_covers_every_offense() {
        let result = FileResult::new(
            "test.rb".to_string(),
            vec![
                make_offense("Style/A", 1),
                make_offense("Style/B", 1),
                make_offense("Style/C", 2),
            ],
        );

        let indexed: usize = [1, 2].iter().map(|&l| result.offenses_at(l).count()).sum();
        assert_eq!(indexed, result.offenses().len());
    }

    #[test]
    fn test_offenses_preserve_report_order() {
        let result = FileResult::new(
            "test.rb".to_string(),
            vec![make_offense("Style/B", 2), make_offense("Style/A", 1)],
        );
        let cops: Vec<&str> = result.offenses().iter().map(Offense::cop).collect();
        assert_eq!(cops, vec!["Style/B", "Style/A"]);
    }
}
