//! MTA Rust GoImports Core Library
//!
//! This library walks a Go source tree and maps every package directory to
//! the import paths declared by the `.go` files it contains.
//!
//! # Features
//!
//! - Recursive directory discovery with a substring exclusion rule (`vendor` by default)
//! - Import extraction from the preamble of Go files only, via tree-sitter
//! - Directory keys made relative to `$GOPATH/src/`
//! - Output as plain text, JSON, or YAML
//!
//! # Example
//!
//! ```no_run
//! use mta_rust_goimports_core::{
//!     format_output, resolve_root_prefix, ImportScanner, OutputFormat, ScanConfig,
//! };
//! use std::path::PathBuf;
//!
//! let config = ScanConfig::new(PathBuf::from(".")).with_root_prefix(resolve_root_prefix());
//! let import_map = ImportScanner::new(config).scan().unwrap();
//!
//! let json = format_output(&import_map, OutputFormat::Json, false).unwrap();
//! print!("{}", json);
//! ```

pub mod collector;
pub mod config;
pub mod extractor;
pub mod models;
pub mod normalize;
pub mod output;
pub mod parsers;
pub mod walker;

// Re-exports for convenience
pub use collector::{CollectError, ImportCollector};
pub use config::{resolve_root_prefix, root_prefix_from, ParseFailurePolicy, ScanConfig};
pub use extractor::{ExtractError, ImportExtractor};
pub use models::*;
pub use normalize::normalize_key;
pub use output::{format_output, FormatError, OutputFormat};
pub use walker::{walk_directories, ExcludeRule, WalkError};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error("Parser error: {0}")]
    ParserError(#[from] parsers::ParserError),
}

/// Runs the walk, extract and normalize pipeline for one configuration
pub struct ImportScanner {
    config: ScanConfig,
}

impl ImportScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan the tree and return the import map
    pub fn scan(&self) -> Result<ImportMap, ScanError> {
        self.scan_with_stats().map(|(map, _)| map)
    }

    /// Scan the tree and also return the run counters
    pub fn scan_with_stats(&self) -> Result<(ImportMap, ScanStats), ScanError> {
        let rule = ExcludeRule::new(self.config.exclude.clone(), self.config.prune_excluded);
        let dirs = walk_directories(&self.config.root, &rule)?;
        tracing::debug!(
            root = %self.config.root.display(),
            directories = dirs.len(),
            "walk finished"
        );

        let extractor = ImportExtractor::new(self.config.failure_policy)?;
        let mut collector = ImportCollector::new(extractor, self.config.root_prefix.clone());
        let import_map = collector.collect(&dirs)?;

        Ok((import_map, collector.stats()))
    }
}
