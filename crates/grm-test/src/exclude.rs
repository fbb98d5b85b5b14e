// Exclusion list: corpus line numbers that are skipped without being scored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hashbrown::HashSet;

use crate::HarnessError;

/// Set of 1-based corpus line numbers to skip.
///
/// An excluded line is treated exactly like a comment: it still advances the
/// line counter but produces no test and no report entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    lines: HashSet<usize>,
}

impl ExclusionSet {
    /// Load the exclusion file at `path`, or return an empty set if there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, HarnessError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let file = File::open(path).map_err(|e| {
            HarnessError::io(format!("couldn't open exclusion file {}", path.display()), e)
        })?;
        let set = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), excluded = set.len(), "loaded exclusions");
        Ok(set)
    }

    /// Read one decimal integer per line. Blank lines are ignored and
    /// anything that is not an integer is an error. Zero and negative
    /// entries are accepted but exclude nothing.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, HarnessError> {
        let mut lines = HashSet::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| HarnessError::io("failed to read exclusion file", e))?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            let number = text.parse::<i64>().map_err(|_| HarnessError::BadExclusion {
                line: index + 1,
                text: text.to_string(),
            })?;
            // Corpus lines start at 1; other numbers can never match
            if let Ok(number @ 1..) = usize::try_from(number) {
                lines.insert(number);
            }
        }
        Ok(Self { lines })
    }

    /// Whether corpus line `line_number` is excluded.
    #[inline]
    pub fn contains(&self, line_number: usize) -> bool {
        self.lines.contains(&line_number)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromIterator<usize> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn no_path_means_empty() {
        let set = ExclusionSet::load(None).unwrap();
        assert!(set.is_empty());
        assert!(!set.contains(1));
    }

    #[test]
    fn read_line_numbers() {
        let set = ExclusionSet::from_reader(Cursor::new("3\n17\n\n42\n")).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains(3));
        assert!(set.contains(17));
        assert!(set.contains(42));
        assert!(!set.contains(4));
    }

    #[test]
    fn duplicates_collapse() {
        let set = ExclusionSet::from_reader(Cursor::new("5\n5\n5")).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(5));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let set = ExclusionSet::from_reader(Cursor::new("  8 \r\n")).unwrap();
        assert!(set.contains(8));
    }

    #[test]
    fn reject_non_numbers() {
        let err = ExclusionSet::from_reader(Cursor::new("1\ntwo\n3")).unwrap_err();
        match err {
            HarnessError::BadExclusion { line, text } => {
                assert_eq!(line, 2);
                assert_eq!(text, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_numbers_exclude_nothing() {
        let set = ExclusionSet::from_reader(Cursor::new("3\n-1\n0\n")).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(3));
        assert!(!set.contains(0));
        assert!(!set.contains(1));
    }

    #[test]
    fn reject_fractional_numbers() {
        assert!(ExclusionSet::from_reader(Cursor::new("1.5")).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exclude.txt");
        std::fs::write(&path, "2\n9\n").unwrap();
        let set = ExclusionSet::load(Some(&path)).unwrap();
        assert!(set.contains(2));
        assert!(set.contains(9));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExclusionSet::load(Some(&dir.path().join("nope"))).unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }));
    }

    #[test]
    fn collect_from_iterator() {
        let set: ExclusionSet = [1, 4, 4].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
