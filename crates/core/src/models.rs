use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from a normalized directory key to the imports declared by the
/// Go files directly inside that directory.
///
/// Keys are kept sorted so every structured rendering of the same map is
/// byte-identical. Import lists keep parse order and are never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the imports for a directory, returning the list it replaced.
    pub fn insert(&mut self, key: String, imports: Vec<String>) -> Option<Vec<String>> {
        self.entries.insert(key, imports)
    }

    pub fn get(&self, key: &str) -> Option<&Vec<String>> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, Vec<String>)> for ImportMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A single import spec found in a Go import declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Import path with the enclosing quotes removed
    pub path: String,
    /// Local name, `.` or `_` when the spec is named
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Line number in source file
    pub line: usize,
}

/// Counters gathered while collecting a single run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub directories_walked: usize,
    pub directories_recorded: usize,
    pub directories_skipped: usize,
    pub files_parsed: usize,
    pub files_failed: usize,
}
