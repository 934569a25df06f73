use crate::extractor::ImportExtractor;
use crate::models::{ImportMap, ScanStats};
use crate::normalize::{absolute_path, directory_key};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("getting full path of {path}: {source}")]
    AbsolutePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Builds the import map from the directories produced by the walker
pub struct ImportCollector {
    extractor: ImportExtractor,
    root_prefix: String,
    stats: ScanStats,
}

impl ImportCollector {
    pub fn new(extractor: ImportExtractor, root_prefix: impl Into<String>) -> Self {
        Self {
            extractor,
            root_prefix: root_prefix.into(),
            stats: ScanStats::default(),
        }
    }

    /// Extract each directory in order and record the non-empty results.
    ///
    /// Directories that fail to parse are skipped. Failing to resolve the
    /// absolute path of a directory aborts the collection.
    pub fn collect(&mut self, dirs: &[PathBuf]) -> Result<ImportMap, CollectError> {
        let mut imports = ImportMap::new();

        for dir in dirs {
            self.stats.directories_walked += 1;

            let found = match self.extractor.extract_dir(dir) {
                Ok(found) => found,
                Err(err) => {
                    tracing::debug!(dir = %dir.display(), error = %err, "skipping directory");
                    self.stats.directories_skipped += 1;
                    continue;
                }
            };
            self.stats.files_parsed += found.files_parsed;
            self.stats.files_failed += found.files_failed;

            if found.imports.is_empty() {
                continue;
            }

            let key = self.key_for(dir)?;
            if let Some(previous) = imports.insert(key.clone(), found.imports) {
                tracing::warn!(
                    key = %key,
                    dir = %dir.display(),
                    replaced = previous.len(),
                    "directory key collision, keeping the later directory"
                );
            } else {
                self.stats.directories_recorded += 1;
            }
        }

        Ok(imports)
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    fn key_for(&self, dir: &Path) -> Result<String, CollectError> {
        let absolute = absolute_path(dir).map_err(|source| CollectError::AbsolutePath {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(directory_key(&absolute, &self.root_prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseFailurePolicy;
    use std::fs;
    use tempfile::TempDir;

    fn collector(prefix: &str, policy: ParseFailurePolicy) -> ImportCollector {
        ImportCollector::new(ImportExtractor::new(policy).unwrap(), prefix)
    }

    fn prefix_of(tmp: &TempDir) -> String {
        let mut prefix = absolute_path(tmp.path())
            .unwrap()
            .to_string_lossy()
            .into_owned();
        prefix.push(std::path::MAIN_SEPARATOR);
        prefix
    }

    #[test]
    fn test_collects_non_empty_directories() {
        let tmp = TempDir::new().unwrap();
        let pkg = tmp.path().join("pkgA");
        let empty = tmp.path().join("empty");
        let docs = tmp.path().join("docs");
        fs::create_dir_all(&pkg).unwrap();
        fs::create_dir_all(&empty).unwrap();
        fs::create_dir_all(&docs).unwrap();
        fs::write(pkg.join("a.go"), "package a\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n").unwrap();
        fs::write(docs.join("doc.go"), "// Package docs.\npackage docs\n").unwrap();

        let mut collector = collector(&prefix_of(&tmp), ParseFailurePolicy::SkipDirectory);
        let map = collector.collect(&[pkg, empty, docs]).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("pkgA").unwrap(), &vec!["fmt", "os"]);

        let stats = collector.stats();
        assert_eq!(stats.directories_walked, 3);
        assert_eq!(stats.directories_recorded, 1);
        assert_eq!(stats.files_parsed, 2);
    }

    #[test]
    fn test_unparseable_directory_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let broken = tmp.path().join("broken");
        let ok = tmp.path().join("ok");
        fs::create_dir_all(&broken).unwrap();
        fs::create_dir_all(&ok).unwrap();
        fs::write(broken.join("a.go"), "package a\n\nimport \"fmt\"\n").unwrap();
        fs::write(broken.join("b.go"), "").unwrap();
        fs::write(ok.join("c.go"), "package c\n\nimport \"net\"\n").unwrap();

        let mut collector = collector(&prefix_of(&tmp), ParseFailurePolicy::SkipDirectory);
        let map = collector.collect(&[broken, ok]).unwrap();

        assert!(!map.contains_key("broken"));
        assert_eq!(map.get("ok").unwrap(), &vec!["net"]);
        assert_eq!(collector.stats().directories_skipped, 1);
    }

    #[test]
    fn test_skip_file_policy_keeps_partial_directory() {
        let tmp = TempDir::new().unwrap();
        let mixed = tmp.path().join("mixed");
        fs::create_dir_all(&mixed).unwrap();
        fs::write(mixed.join("a.go"), "package a\n\nimport \"fmt\"\n").unwrap();
        fs::write(mixed.join("b.go"), "").unwrap();

        let mut collector = collector(&prefix_of(&tmp), ParseFailurePolicy::SkipFile);
        let map = collector.collect(&[mixed]).unwrap();

        assert_eq!(map.get("mixed").unwrap(), &vec!["fmt"]);
        assert_eq!(collector.stats().files_failed, 1);
    }

    #[test]
    fn test_empty_prefix_keeps_absolute_keys() {
        let tmp = TempDir::new().unwrap();
        let pkg = tmp.path().join("pkg");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("p.go"), "package p\n\nimport \"io\"\n").unwrap();

        let mut collector = collector("", ParseFailurePolicy::SkipDirectory);
        let map = collector.collect(&[pkg.clone()]).unwrap();

        let expected = absolute_path(&pkg).unwrap().to_string_lossy().into_owned();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![&expected]);
    }

    #[test]
    fn test_colliding_keys_keep_later_directory() {
        let tmp = TempDir::new().unwrap();
        let pkg = tmp.path().join("pkg");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("p.go"), "package p\n\nimport \"io\"\n").unwrap();
        let dotted = pkg.join(".");

        let mut collector = collector(&prefix_of(&tmp), ParseFailurePolicy::SkipDirectory);
        let map = collector.collect(&[pkg, dotted]).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(collector.stats().directories_recorded, 1);
    }
}
