// SCSS class extraction
//
// Pipeline: style source -> grass compile -> plain CSS -> tree-sitter-css
// rule tree -> class selector names. Nesting, comma-separated selector
// alternatives, and rules inside at-rules all reduce to `class_selector`
// nodes in the compiled output, so a single full-tree walk covers them.

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use tree_sitter::{Node, Parser};

/// Failure while turning a style source into class names.
///
/// Callers treat any variant as "no classes for this file in this pass" and
/// keep the previously cached state; a bad file must never corrupt the cache.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to compile style source {path}: {message}")]
    Compile { path: String, message: String },

    #[error("failed to load CSS grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("tree-sitter returned no tree for compiled CSS")]
    Parse,
}

/// Stateless extractor for class selector names.
pub struct ClassExtractor;

impl Default for ClassExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Compile the SCSS file at `path` and collect every class selector name
    /// from the compiled output.
    pub fn extract_classes(&self, path: &Path) -> Result<HashSet<String>, ExtractError> {
        let css =
            grass::from_path(path, &grass::Options::default()).map_err(|e| ExtractError::Compile {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let classes = self.extract_classes_from_css(&css)?;
        debug!(
            "Extracted {} class names from {}",
            classes.len(),
            path.display()
        );
        Ok(classes)
    }

    /// Collect class selector names from already-compiled CSS text.
    pub fn extract_classes_from_css(&self, css: &str) -> Result<HashSet<String>, ExtractError> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_css::LANGUAGE.into())?;

        let tree = parser.parse(css, None).ok_or(ExtractError::Parse)?;

        let mut classes = HashSet::new();
        collect_class_names(tree.root_node(), css.as_bytes(), &mut classes);
        Ok(classes)
    }
}

/// Depth-first walk gathering the `class_name` child of every
/// `class_selector` node.
fn collect_class_names(node: Node, source: &[u8], classes: &mut HashSet<String>) {
    if node.kind() == "class_selector" {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "class_name" {
                if let Ok(name) = child.utf8_text(source) {
                    if !name.is_empty() {
                        classes.insert(name.to_string());
                    }
                }
            }
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_class_names(child, source, classes);
    }
}
