use std::env;
use std::path::{Path, PathBuf};

/// Default substring that keeps vendored dependencies out of the map
pub const DEFAULT_EXCLUDE: &str = "vendor";

/// Environment variable naming the Go workspace root
pub const GOPATH_ENV: &str = "GOPATH";

/// What to do when a Go file in a directory fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseFailurePolicy {
    /// Drop the whole directory when any of its files fails
    #[default]
    SkipDirectory,
    /// Drop only the failing file and keep the rest of the directory
    SkipFile,
}

/// Configuration for scanning
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,
    /// Directories whose path contains this substring are not recorded
    pub exclude: String,
    /// Stop descending into excluded directories
    pub prune_excluded: bool,
    /// Granularity of parse failures
    pub failure_policy: ParseFailurePolicy,
    /// Prefix stripped from absolute directory paths to build map keys
    pub root_prefix: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude: DEFAULT_EXCLUDE.to_string(),
            prune_excluded: false,
            failure_policy: ParseFailurePolicy::default(),
            root_prefix: String::new(),
        }
    }
}

impl ScanConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn with_exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = exclude.into();
        self
    }

    pub fn with_prune_excluded(mut self, prune: bool) -> Self {
        self.prune_excluded = prune;
        self
    }

    pub fn with_failure_policy(mut self, policy: ParseFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_root_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.root_prefix = prefix.into();
        self
    }
}

/// Resolve the key prefix from `GOPATH`, falling back to `$HOME/go`.
pub fn resolve_root_prefix() -> String {
    let gopath = env::var(GOPATH_ENV).ok();
    root_prefix_from(gopath.as_deref(), dirs::home_dir().as_deref())
}

/// Build the `<gopath>/src/` prefix from explicit inputs.
///
/// An unset or empty `gopath` falls back to `<home>/go`. With neither
/// available the prefix is empty and keys stay absolute.
pub fn root_prefix_from(gopath: Option<&str>, home: Option<&Path>) -> String {
    let base = match gopath.filter(|p| !p.is_empty()) {
        Some(p) => PathBuf::from(p),
        None => match home {
            Some(home) => home.join("go"),
            None => return String::new(),
        },
    };

    let mut prefix = base.join("src").to_string_lossy().into_owned();
    prefix.push(std::path::MAIN_SEPARATOR);
    prefix
}
