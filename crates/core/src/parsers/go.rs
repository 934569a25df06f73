use crate::models::ImportSpec;
use tree_sitter::{Node, Parser};

use super::{ImportParser, ParserError};

pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, ParserError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ParserError::InitError(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Walk the top-level nodes up to the end of the import section.
    ///
    /// Anything after the last import declaration is never inspected, so
    /// syntax errors in function bodies do not fail the file.
    fn extract_imports(
        &self,
        source: &str,
        tree: &tree_sitter::Tree,
    ) -> Result<Vec<ImportSpec>, ParserError> {
        let root = tree.root_node();
        let mut imports = Vec::new();
        let mut seen_package = false;

        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            let line = node.start_position().row + 1;
            match node.kind() {
                "comment" => {}
                "package_clause" => {
                    if seen_package || node.has_error() {
                        return Err(ParserError::SyntaxError(line));
                    }
                    seen_package = true;
                }
                "import_declaration" => {
                    if !seen_package {
                        return Err(ParserError::MissingPackageClause(line));
                    }
                    if node.has_error() {
                        return Err(ParserError::SyntaxError(line));
                    }
                    self.parse_import_declaration(&node, source, &mut imports);
                }
                "ERROR" => {
                    if !seen_package || contains_import_keyword(&node) {
                        return Err(ParserError::SyntaxError(line));
                    }
                    break;
                }
                _ => {
                    if !seen_package {
                        return Err(ParserError::MissingPackageClause(line));
                    }
                    break;
                }
            }
        }

        if !seen_package {
            return Err(ParserError::MissingPackageClause(
                root.end_position().row + 1,
            ));
        }

        Ok(imports)
    }

    /// Handle `import "x"` and `import ( ... )`
    fn parse_import_declaration(&self, node: &Node, source: &str, imports: &mut Vec<ImportSpec>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => self.parse_import_spec(&child, source, imports),
                "import_spec_list" => {
                    let mut inner_cursor = child.walk();
                    for spec in child.named_children(&mut inner_cursor) {
                        if spec.kind() == "import_spec" {
                            self.parse_import_spec(&spec, source, imports);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn parse_import_spec(&self, node: &Node, source: &str, imports: &mut Vec<ImportSpec>) {
        let Some(path) = node.child_by_field_name("path") else {
            return;
        };
        let name = node
            .child_by_field_name("name")
            .map(|n| self.get_node_text(&n, source));

        imports.push(ImportSpec {
            path: self.extract_string_value(&path, source),
            name,
            line: node.start_position().row + 1,
        });
    }

    /// Remove one pair of enclosing `"` or `` ` `` delimiters. Escapes are kept
    /// verbatim.
    fn extract_string_value(&self, node: &Node, source: &str) -> String {
        let text = self.get_node_text(node, source);
        for quote in ['"', '`'] {
            if let Some(inner) = text
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
            {
                return inner.to_string();
            }
        }
        text
    }

    fn get_node_text(&self, node: &Node, source: &str) -> String {
        source[node.byte_range()].to_string()
    }
}

fn contains_import_keyword(node: &Node) -> bool {
    if node.kind() == "import" && !node.is_named() {
        return true;
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| contains_import_keyword(&child));
    found
}

impl ImportParser for GoParser {
    fn parse(&mut self, source: &str) -> Result<Vec<ImportSpec>, ParserError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParserError::ParseError("parser produced no tree".to_string()))?;
        self.extract_imports(source, &tree)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }
}
