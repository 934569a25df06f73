mod go;

pub use go::GoParser;

use crate::models::ImportSpec;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to initialize parser: {0}")]
    InitError(String),
    #[error("Failed to parse source code: {0}")]
    ParseError(String),
    #[error("Expected package clause before line {0}")]
    MissingPackageClause(usize),
    #[error("Syntax error in import section at line {0}")]
    SyntaxError(usize),
}

/// Trait for parsers that read only the import preamble of a source file
pub trait ImportParser {
    /// Parse source code and extract the import specs of its preamble
    fn parse(&mut self, source: &str) -> Result<Vec<ImportSpec>, ParserError>;

    /// File extensions (without the dot) this parser accepts
    fn extensions(&self) -> &'static [&'static str];
}

/// Create the parser for Go sources
pub fn create_parser() -> Result<Box<dyn ImportParser>, ParserError> {
    Ok(Box::new(GoParser::new()?))
}
