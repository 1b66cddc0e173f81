// Markup-attribute context classifier
//
// Parses the document as HTML and reports whether the offset falls inside
// the value of a `class` or `classname` attribute. Attribute values are
// located by their tree-sitter node byte ranges, so repeated values resolve
// to the correct occurrence. The span check is inclusive at both ends: the
// positions immediately inside the quotes count, as does an empty value's
// single between-quotes position.

use tree_sitter::{Node, Parser};

/// Attribute names that carry completable class lists. HTML attribute names
/// are case-insensitive.
const CLASS_ATTRIBUTES: [&str; 2] = ["class", "classname"];

/// True when `offset` (a byte offset into `text`) is inside the value of a
/// class-bearing attribute of any opening tag. Fails closed on any parse
/// problem.
pub fn is_in_markup_context(text: &str, offset: usize) -> bool {
    let mut parser = Parser::new();
    if parser
        .set_language(&tree_sitter_html::LANGUAGE.into())
        .is_err()
    {
        return false;
    }
    let Some(tree) = parser.parse(text, None) else {
        return false;
    };

    attribute_contains_offset(tree.root_node(), text.as_bytes(), offset)
}

fn attribute_contains_offset(node: Node, source: &[u8], offset: usize) -> bool {
    if node.kind() == "attribute" && is_class_attribute(node, source) {
        if let Some((start, end)) = attribute_value_span(node) {
            if offset >= start && offset <= end {
                return true;
            }
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if attribute_contains_offset(child, source, offset) {
            return true;
        }
    }
    false
}

fn is_class_attribute(attribute: Node, source: &[u8]) -> bool {
    let mut cursor = attribute.walk();
    for child in attribute.children(&mut cursor) {
        if child.kind() == "attribute_name" {
            return match child.utf8_text(source) {
                Ok(name) => CLASS_ATTRIBUTES
                    .iter()
                    .any(|attr| name.eq_ignore_ascii_case(attr)),
                Err(_) => false,
            };
        }
    }
    false
}

/// Byte span of an attribute's value, quotes excluded. An empty quoted value
/// (`class=""`) yields the zero-width span between the quotes. A valueless
/// attribute yields `None`.
fn attribute_value_span(attribute: Node) -> Option<(usize, usize)> {
    let mut cursor = attribute.walk();
    for child in attribute.children(&mut cursor) {
        match child.kind() {
            // Unquoted value: the node is the value.
            "attribute_value" => return Some((child.start_byte(), child.end_byte())),
            "quoted_attribute_value" => {
                let mut inner = child.walk();
                for grandchild in child.children(&mut inner) {
                    if grandchild.kind() == "attribute_value" {
                        return Some((grandchild.start_byte(), grandchild.end_byte()));
                    }
                }
                // Empty value: only the quote tokens exist.
                let inside = child.start_byte() + 1;
                return Some((inside, inside));
            }
            _ => {}
        }
    }
    None
}
