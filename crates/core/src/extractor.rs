//! Per-directory import extraction
//!
//! Reads every Go file directly inside one directory (subdirectories are
//! handled by their own call) and concatenates the import paths of their
//! preambles in file name order.

use crate::config::ParseFailurePolicy;
use crate::parsers::{create_parser, ImportParser, ParserError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParserError,
    },
}

/// Imports found in one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryImports {
    /// Import paths in file order, then declaration order
    pub imports: Vec<String>,
    pub files_parsed: usize,
    pub files_failed: usize,
}

/// Extracts the imports declared by the source files of a directory
pub struct ImportExtractor {
    parser: Box<dyn ImportParser>,
    policy: ParseFailurePolicy,
}

impl ImportExtractor {
    pub fn new(policy: ParseFailurePolicy) -> Result<Self, ParserError> {
        Ok(Self {
            parser: create_parser()?,
            policy,
        })
    }

    /// Extract the imports of every source file directly inside `dir`.
    ///
    /// With [`ParseFailurePolicy::SkipDirectory`] the first failing file
    /// fails the whole directory. With [`ParseFailurePolicy::SkipFile`] only
    /// that file is dropped. Failing to list the directory is always an error.
    pub fn extract_dir(&mut self, dir: &Path) -> Result<DirectoryImports, ExtractError> {
        let mut result = DirectoryImports::default();

        for path in self.source_files(dir)? {
            match self.extract_file(&path) {
                Ok(imports) => {
                    result.files_parsed += 1;
                    result.imports.extend(imports);
                }
                Err(err) => match self.policy {
                    ParseFailurePolicy::SkipDirectory => return Err(err),
                    ParseFailurePolicy::SkipFile => {
                        tracing::debug!(error = %err, "skipping unparseable file");
                        result.files_failed += 1;
                    }
                },
            }
        }

        Ok(result)
    }

    /// Parse the preamble of a single file. The source buffer is dropped
    /// before returning.
    fn extract_file(&mut self, path: &Path) -> Result<Vec<String>, ExtractError> {
        let content = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let specs = self
            .parser
            .parse(&content)
            .map_err(|source| ExtractError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(specs.into_iter().map(|spec| spec.path).collect())
    }

    /// Source files directly inside `dir`, sorted by file name
    fn source_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        let io_err = |source| ExtractError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if entry.file_type().map_err(io_err)?.is_dir() {
                continue;
            }

            let path = entry.path();
            let accepted = path
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy();
                    self.parser.extensions().iter().any(|e| *e == ext)
                })
                .unwrap_or(false);
            if accepted {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}
