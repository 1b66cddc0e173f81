// Stylie's extraction module
//
// Turns style sources into class-name sets: SCSS is compiled to plain CSS,
// the CSS is parsed with tree-sitter, and every class selector contributes
// one name. The cache layer consumes these sets and never sees style syntax.

pub mod css;

pub use css::{ClassExtractor, ExtractError};
