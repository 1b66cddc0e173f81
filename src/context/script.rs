// Call-expression context classifier
//
// Parses the document with the TSX grammar (which accepts plain JavaScript,
// JSX, and TypeScript alike) and reports whether the offset falls inside a
// top-level string-literal argument of a call to a bare `cva` or `cx`
// identifier. The walk stops at the first match. Member calls
// (`styles.cx(...)`) and other callee shapes never match.

use tree_sitter::{Node, Parser};

/// Utility-call names whose string arguments hold class lists.
const UTILITY_CALLEES: [&str; 2] = ["cva", "cx"];

/// True when `offset` (a byte offset into `source`) is inside a
/// string-literal argument of a `cva`/`cx` call. Fails closed on any parse
/// problem.
pub fn is_in_call_context(source: &str, offset: usize) -> bool {
    let mut parser = Parser::new();
    if parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
        .is_err()
    {
        return false;
    }
    let Some(tree) = parser.parse(source, None) else {
        return false;
    };

    call_argument_contains_offset(tree.root_node(), source.as_bytes(), offset)
}

fn call_argument_contains_offset(node: Node, source: &[u8], offset: usize) -> bool {
    if node.kind() == "call_expression" && is_utility_call(node, source) {
        if let Some(arguments) = node.child_by_field_name("arguments") {
            let mut cursor = arguments.walk();
            for argument in arguments.named_children(&mut cursor) {
                // Only direct string-literal arguments count; literals nested
                // inside object arguments are variant values, not class lists.
                if argument.kind() == "string"
                    && offset >= argument.start_byte()
                    && offset <= argument.end_byte()
                {
                    return true;
                }
            }
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if call_argument_contains_offset(child, source, offset) {
            return true;
        }
    }
    false
}

fn is_utility_call(call: Node, source: &[u8]) -> bool {
    let Some(callee) = call.child_by_field_name("function") else {
        return false;
    };
    if callee.kind() != "identifier" {
        return false;
    }
    matches!(callee.utf8_text(source), Ok(name) if UTILITY_CALLEES.contains(&name))
}
