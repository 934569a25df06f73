use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("error walking directories under {root}: {source}")]
    Traversal {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Substring rule deciding which directories stay out of the result
#[derive(Debug, Clone)]
pub struct ExcludeRule {
    pattern: String,
    prune: bool,
}

impl ExcludeRule {
    pub fn new(pattern: impl Into<String>, prune: bool) -> Self {
        Self {
            pattern: pattern.into(),
            prune,
        }
    }

    /// Check if a path should be left out. An empty pattern matches nothing.
    pub fn is_excluded(&self, path: &Path) -> bool {
        !self.pattern.is_empty() && path.to_string_lossy().contains(self.pattern.as_str())
    }

    fn should_descend(&self, entry: &DirEntry) -> bool {
        !(self.prune && entry.file_type().is_dir() && self.is_excluded(entry.path()))
    }
}

/// List `root` and every directory below it, depth-first in file name order.
///
/// Directories matching the rule are never returned. Without pruning the
/// walk still enters them, so a read error deep inside an excluded subtree
/// still fails the whole walk.
pub fn walk_directories(root: &Path, rule: &ExcludeRule) -> Result<Vec<PathBuf>, WalkError> {
    let mut dirs = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| rule.should_descend(entry));

    for entry in walker {
        let entry = entry.map_err(|source| WalkError::Traversal {
            root: root.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() && !rule.is_excluded(entry.path()) {
            dirs.push(entry.into_path());
        }
    }

    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        for dir in ["pkgA", "pkgB/inner", "vendor/skip", "vendor/skip/deeper"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        fs::write(tmp.path().join("pkgA/a.go"), "package a\n").unwrap();
        tmp
    }

    fn relative(root: &Path, dirs: &[PathBuf]) -> Vec<String> {
        dirs.iter()
            .map(|d| {
                d.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_walk_lists_root_and_descendants_in_order() {
        let tmp = fixture();
        let rule = ExcludeRule::new("vendor", false);
        let dirs = walk_directories(tmp.path(), &rule).unwrap();

        assert_eq!(
            relative(tmp.path(), &dirs),
            vec!["", "pkgA", "pkgB", "pkgB/inner"]
        );
    }

    #[test]
    fn test_excluded_directories_are_not_listed() {
        let tmp = fixture();
        let rule = ExcludeRule::new("vendor", false);
        let dirs = walk_directories(tmp.path(), &rule).unwrap();

        assert!(dirs.iter().all(|d| !d.to_string_lossy().contains("vendor")));
    }

    #[test]
    fn test_descendants_of_excluded_dirs_never_listed() {
        let tmp = fixture();
        fs::create_dir_all(tmp.path().join("third_party/lib")).unwrap();

        // Descendant paths carry the ancestor's name, so the substring rule
        // drops them whether or not the walk enters the subtree.
        for prune in [false, true] {
            let rule = ExcludeRule::new("third_party", prune);
            let dirs = relative(tmp.path(), &walk_directories(tmp.path(), &rule).unwrap());
            assert!(!dirs.contains(&"third_party".to_string()));
            assert!(!dirs.contains(&"third_party/lib".to_string()));
            assert!(dirs.contains(&"vendor/skip".to_string()));
        }
    }

    #[test]
    fn test_pruning_skips_subtree() {
        let tmp = fixture();
        let rule = ExcludeRule::new("vendor", true);
        let dirs = walk_directories(tmp.path(), &rule).unwrap();

        assert_eq!(
            relative(tmp.path(), &dirs),
            vec!["", "pkgA", "pkgB", "pkgB/inner"]
        );
    }

    #[test]
    fn test_empty_pattern_excludes_nothing() {
        let tmp = fixture();
        let rule = ExcludeRule::new("", false);
        let dirs = walk_directories(tmp.path(), &rule).unwrap();

        assert!(relative(tmp.path(), &dirs).contains(&"vendor/skip/deeper".to_string()));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let rule = ExcludeRule::new("vendor", false);

        let result = walk_directories(&missing, &rule);
        assert!(matches!(result, Err(WalkError::Traversal { .. })));
    }

    #[test]
    fn test_is_excluded_matches_substring() {
        let rule = ExcludeRule::new("vendor", false);
        assert!(rule.is_excluded(Path::new("./vendor")));
        assert!(rule.is_excluded(Path::new("./pkg/vendored")));
        assert!(!rule.is_excluded(Path::new("./pkg/internal")));
    }
}
