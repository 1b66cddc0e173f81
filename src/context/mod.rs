// Context classifiers
//
// Two independent predicates decide whether a document offset sits in text
// where class-name completion is meaningful: inside a class-bearing markup
// attribute, or inside a string argument of a `cva`/`cx` utility call. Both
// read only their input text and both fail closed: a parse problem is never
// allowed to produce a spurious completion trigger.

pub mod markup;
pub mod script;

pub use markup::is_in_markup_context;
pub use script::is_in_call_context;

/// Document language ids the classifiers are consulted for. The style-file
/// watcher is not gated by this list; only the editor-facing paths are.
pub const SUPPORTED_LANGUAGES: [&str; 7] = [
    "html",
    "javascript",
    "javascriptreact",
    "svelte",
    "typescript",
    "typescriptreact",
    "vue",
];

pub fn is_supported_language(language_id: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language_id)
}

/// Map a document path to its editor language id, the way hosts derive it
/// from the file extension. `None` for documents the classifiers never see.
pub fn language_id_for_path(path: &std::path::Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|s| s.to_str())?;
    match ext {
        "html" | "htm" => Some("html"),
        "js" | "mjs" | "cjs" => Some("javascript"),
        "jsx" => Some("javascriptreact"),
        "ts" => Some("typescript"),
        "tsx" => Some("typescriptreact"),
        "svelte" => Some("svelte"),
        "vue" => Some("vue"),
        _ => None,
    }
}

/// Combined predicate used by the completion and retrigger paths.
pub fn is_in_class_context(text: &str, offset: usize) -> bool {
    is_in_call_context(text, offset) || is_in_markup_context(text, offset)
}
